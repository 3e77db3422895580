pub mod header;
pub mod map_view;
pub mod status_bar;
