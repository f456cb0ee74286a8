pub mod header;
pub mod help_overlay;
pub mod lyrics_view;
pub mod song_list;
