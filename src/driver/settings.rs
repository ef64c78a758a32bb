use std::path::Path;
use std::str::FromStr;

use regex::Regex;

use crate::solver::Settings;
use crate::utils::prelude::*;

/// Reads a settings file: one `key = value` per line, `#` starts a comment.
/// Every key is required; unknown keys, repeats and malformed lines are
/// errors, as are values outside the ranges the core accepts.
pub fn read_settings(path: &Path) -> Result<Settings> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading settings from {}", path.display()))?;
    parse_settings(&text)
}

/// Parses settings file content; see [`read_settings`].
pub fn parse_settings(text: &str) -> Result<Settings> {
    let line_format = Regex::new(r"^([a-z_]+)\s*=\s*(\S+)$").unwrap();

    let mut values: HashMap<&str, &str> = HashMap::new();
    for (number, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let captures = line_format
            .captures(line)
            .ok_or(anyhow!("malformed settings line {}: {raw}", number + 1))?;
        let (key, value) = (captures.get(1).unwrap(), captures.get(2).unwrap());
        if !KNOWN_KEYS.contains(&key.as_str()) {
            return Err(anyhow!("unknown setting {} on line {}", key.as_str(), number + 1));
        }
        if values.insert(key.as_str(), value.as_str()).is_some() {
            return Err(anyhow!("setting {} repeats on line {}", key.as_str(), number + 1));
        }
    }

    let settings = Settings {
        board_size: required(&values, "board_size")?,
        pattern_num: required(&values, "pattern_num")?,
        pop_size: required(&values, "pop_size")?,
        selection: required(&values, "selection")?,
        crossover: required(&values, "crossover")?,
        mutation: required(&values, "mutation")?,
        mut_rate: required(&values, "mut_rate")?,
        elite_rate: required(&values, "elite_rate")?,
        start_piece: required(&values, "start_piece")?,
    };
    settings.validate()?;
    Ok(settings)
}

const KNOWN_KEYS: [&str; 9] = [
    "board_size",
    "pattern_num",
    "pop_size",
    "selection",
    "crossover",
    "mutation",
    "mut_rate",
    "elite_rate",
    "start_piece",
];

fn required<T>(values: &HashMap<&str, &str>, key: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    values
        .get(key)
        .ok_or(anyhow!("missing setting {key}"))?
        .parse::<T>()
        .map_err(|e| anyhow!("invalid value for {key}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{CrossoverMethod, MutationMethod, SelectionMethod};

    const GOOD: &str = "\
# solver configuration
board_size = 16
pattern_num = 22
pop_size = 1000

selection = tournament
crossover = one-point
mutation = rotate-swap  # the best method from the experiments
mut_rate = 2.5
elite_rate = 5
start_piece = true
";

    #[test]
    fn parses_a_full_file() {
        let settings = parse_settings(GOOD).unwrap();
        assert_eq!(settings.board_size, 16);
        assert_eq!(settings.pattern_num, 22);
        assert_eq!(settings.pop_size, 1000);
        assert_eq!(settings.selection, SelectionMethod::Tournament);
        assert_eq!(settings.crossover, CrossoverMethod::OnePoint);
        assert_eq!(settings.mutation, MutationMethod::RotateSwap);
        assert_eq!(settings.mut_rate, 2.5);
        assert_eq!(settings.elite_rate, 5);
        assert!(settings.start_piece);
    }

    #[test]
    fn rejects_unknown_keys_and_repeats() {
        assert!(parse_settings(&format!("{GOOD}verbosity = 3\n")).is_err());
        assert!(parse_settings(&format!("{GOOD}pop_size = 10\n")).is_err());
    }

    #[test]
    fn rejects_missing_keys_and_bad_values() {
        assert!(parse_settings("board_size = 16\n").is_err());
        assert!(parse_settings(&GOOD.replace("tournament", "lottery")).is_err());
        assert!(parse_settings(&GOOD.replace("= 2.5", "= x")).is_err());
    }

    #[test]
    fn rejects_out_of_range_records() {
        // parses fine, fails the core's range validation
        assert!(parse_settings(&GOOD.replace("pop_size = 1000", "pop_size = 1")).is_err());
        assert!(parse_settings(&GOOD.replace("board_size = 16", "board_size = 8")).is_err());
    }
}
