//! Utility modules

pub mod file_io;
pub mod text;

pub use text::{
    char_type, is_line_break, is_punctuation, next_tab_stop, normalize_line_endings, CharType,
    TAB_WIDTH,
};

pub use file_io::{filename_for_display, read_text_file, write_text_file, FileError};
