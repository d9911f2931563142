//! Parsing of pasted player name lists.

use crate::models::TournamentError;

/// Split a comma- or newline-separated list of names. Quoted names may contain commas;
/// blank entries are dropped.
pub fn parse_name_list(text: &str) -> Result<Vec<String>, TournamentError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());
    let mut names = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| TournamentError::InvalidNameList(e.to_string()))?;
        names.extend(
            record
                .iter()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(String::from),
        );
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_commas_and_lines() {
        let names = parse_name_list("Ada, Bob ,,\nCy\n\n  Dee  ").unwrap();
        assert_eq!(names, ["Ada", "Bob", "Cy", "Dee"]);
    }

    #[test]
    fn quoted_names_keep_commas() {
        let names = parse_name_list("\"Smith, Jo\",Ann").unwrap();
        assert_eq!(names, ["Smith, Jo", "Ann"]);
    }

    #[test]
    fn empty_input_gives_no_names() {
        assert!(parse_name_list("").unwrap().is_empty());
        assert!(parse_name_list(" , ,").unwrap().is_empty());
    }
}
