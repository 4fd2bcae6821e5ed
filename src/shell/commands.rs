use crate::{
    error::{AppError, AppResult},
    models::MediaType,
};

/// One line of user input, parsed
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Plain text: replace the query and search for it
    Search(String),
    /// Blank line or `:go`: search for the current query
    Submit,
    /// `:query <text>`: edit the query without searching
    SetQuery(String),
    SetMediaType(MediaType),
    ToggleSmartSearch,
    /// Drill into the card at a 1-based position
    Select(usize),
    /// Trailer link for the card at a 1-based position
    Trailer(usize),
    Show,
    Health,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  <title>            search for a title
  <n>                search again using result #n (drill down)
  (empty line), :go  search for the current query
  :query <text>      edit the query without searching
  :anime :manga :manhwa, :type <media>
                     choose what to search
  :smart             toggle semantic (AI) / keyword search
  :trailer <n>       trailer link for result #n
  :show              show the current view
  :health            check the recommendation backend
  :help              this help
  :quit              leave";

/// Parses one input line
pub fn parse_command(line: &str) -> AppResult<Command> {
    let line = line.trim();

    if line.is_empty() {
        return Ok(Command::Submit);
    }

    if let Some(rest) = line.strip_prefix(':') {
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        return match name.to_lowercase().as_str() {
            "go" | "search" if arg.is_empty() => Ok(Command::Submit),
            "go" | "search" => Ok(Command::Search(arg.to_string())),
            "query" => Ok(Command::SetQuery(arg.to_string())),
            "anime" | "manga" | "manhwa" => Ok(Command::SetMediaType(parse_media_type(name)?)),
            "type" | "media" => Ok(Command::SetMediaType(parse_media_type(arg)?)),
            "smart" => Ok(Command::ToggleSmartSearch),
            "open" | "select" => Ok(Command::Select(parse_position(arg)?)),
            "trailer" | "t" => Ok(Command::Trailer(parse_position(arg)?)),
            "show" | "s" => Ok(Command::Show),
            "health" => Ok(Command::Health),
            "help" | "h" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            other => Err(AppError::InvalidInput(format!(
                "Unknown command ':{}' (try :help)",
                other
            ))),
        };
    }

    if line.chars().all(|c| c.is_ascii_digit()) {
        return Ok(Command::Select(parse_position(line)?));
    }

    Ok(Command::Search(line.to_string()))
}

fn parse_media_type(value: &str) -> AppResult<MediaType> {
    value.parse().map_err(AppError::InvalidInput)
}

fn parse_position(value: &str) -> AppResult<usize> {
    match value.parse::<usize>() {
        Ok(position) if position > 0 => Ok(position),
        _ => Err(AppError::InvalidInput(format!(
            "Expected a result number, got '{}'",
            value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        parse_command(line).unwrap()
    }

    #[test]
    fn test_plain_text_is_search() {
        assert_eq!(parse("  Attack on Titan "), Command::Search("Attack on Titan".to_string()));
    }

    #[test]
    fn test_blank_line_submits() {
        assert_eq!(parse(""), Command::Submit);
        assert_eq!(parse("   "), Command::Submit);
        assert_eq!(parse(":go"), Command::Submit);
    }

    #[test]
    fn test_number_selects_card() {
        assert_eq!(parse("3"), Command::Select(3));
        assert_eq!(parse(":open 2"), Command::Select(2));
        assert!(parse_command("0").is_err());
    }

    #[test]
    fn test_media_type_commands() {
        assert_eq!(parse(":manhwa"), Command::SetMediaType(MediaType::Manhwa));
        assert_eq!(parse(":type Manga"), Command::SetMediaType(MediaType::Manga));
        assert!(matches!(
            parse_command(":type novel"),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_query_and_trailer_commands() {
        assert_eq!(parse(":query One Piece"), Command::SetQuery("One Piece".to_string()));
        assert_eq!(parse(":trailer 1"), Command::Trailer(1));
        assert!(parse_command(":trailer").is_err());
        assert!(parse_command(":trailer x").is_err());
    }

    #[test]
    fn test_misc_commands() {
        assert_eq!(parse(":smart"), Command::ToggleSmartSearch);
        assert_eq!(parse(":SHOW"), Command::Show);
        assert_eq!(parse(":health"), Command::Health);
        assert_eq!(parse(":help"), Command::Help);
        assert_eq!(parse(":q"), Command::Quit);
        assert!(parse_command(":launch").is_err());
    }
}
