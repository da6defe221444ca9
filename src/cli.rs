//! Command-line argument parsing

use clap::Parser;
use std::path::PathBuf;

use crate::model::format::FontSize;

/// A minimal text editor
#[derive(Parser, Debug)]
#[command(name = "quill", version, about = "A minimal text editor")]
pub struct CliArgs {
    /// Text file to open at startup
    #[arg(value_name = "FILE")]
    pub path: Option<PathBuf>,

    /// Default point size (8-29), overriding the config file
    #[arg(long, value_name = "PT", value_parser = parse_font_size)]
    pub font_size: Option<FontSize>,
}

fn parse_font_size(arg: &str) -> Result<FontSize, String> {
    let points: u32 = arg
        .parse()
        .map_err(|_| format!("'{}' is not a number", arg))?;
    FontSize::new(points).ok_or_else(|| format!("font size must be between 8 and 29, got {}", points))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args() {
        let args = CliArgs::try_parse_from(["quill"]).unwrap();
        assert!(args.path.is_none());
        assert!(args.font_size.is_none());
    }

    #[test]
    fn test_path_and_size() {
        let args = CliArgs::try_parse_from(["quill", "notes.txt", "--font-size", "20"]).unwrap();
        assert_eq!(args.path, Some(PathBuf::from("notes.txt")));
        assert_eq!(args.font_size.map(FontSize::points), Some(20));
    }

    #[test]
    fn test_font_size_out_of_range_is_rejected() {
        assert!(CliArgs::try_parse_from(["quill", "--font-size", "30"]).is_err());
        assert!(CliArgs::try_parse_from(["quill", "--font-size", "big"]).is_err());
    }

    #[test]
    fn test_about_describes_plain_text_editor() {
        use clap::CommandFactory;

        let about = CliArgs::command().get_about().map(|about| about.to_string());
        assert_eq!(about.as_deref(), Some("A minimal text editor"));
    }
}
