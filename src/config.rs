use crate::error::Error;
use crate::expr::eval;
use crate::normalize::check_separator;
use hashbrown::HashMap;
use log::debug;
use std::env;

/// Environment variable overriding the locale decimal separator
pub const SEPARATOR_VAR: &str = "TALLY_DECIMAL_SEPARATOR";

/// Locale variables, in the order POSIX gives them priority
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_NUMERIC", "LANG"];

lazy_static! {
    /// Decimal separator used by each locale language
    static ref LANGUAGE_SEPARATORS: HashMap<&'static str, char> = {
        let mut map = HashMap::<&'static str, char>::new();
        for language in &["en", "ga", "he", "ja", "ko", "ms", "mt", "th", "zh"] {
            map.insert(*language, '.');
        }
        for language in &[
            "be", "bg", "cs", "da", "de", "el", "es", "et", "fi", "fr", "hr", "hu", "id", "it",
            "kk", "lt", "lv", "nb", "nl", "nn", "no", "pl", "pt", "ro", "ru", "sk", "sl", "sr",
            "sv", "tr", "uk", "vi",
        ] {
            map.insert(*language, ',');
        }
        map.shrink_to_fit();
        map
    };
}

/// Get the decimal separator of a POSIX `locale` name such as
/// `ru_RU.UTF-8`, if the language is known.
///
/// # Examples
///
/// ```
/// # use tally::locale_separator;
/// assert_eq!(locale_separator("ru_RU.UTF-8"), Some(','));
/// assert_eq!(locale_separator("en_US"), Some('.'));
/// assert_eq!(locale_separator("C"), None);
/// ```
pub fn locale_separator(locale: &str) -> Option<char> {
    let language = locale
        .split(|c: char| c == '_' || c == '.' || c == '@' || c == '-')
        .next()?
        .to_ascii_lowercase();
    LANGUAGE_SEPARATORS.get(language.as_str()).copied()
}

/// Evaluation settings: the decimal separator used for input and output, and
/// the number of fractional digits results are rounded to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    separator: char,
    precision: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            separator: '.',
            precision: 2,
        }
    }
}

impl Config {
    /// Default configuration with the given decimal `separator`
    pub fn with_separator(separator: char) -> Result<Self, Error> {
        check_separator(separator)?;
        Ok(Self {
            separator,
            ..Self::default()
        })
    }

    /// Resolve the separator from `TALLY_DECIMAL_SEPARATOR`, then from the
    /// locale variables, falling back to `.`
    pub fn from_env() -> Result<Self, Error> {
        Self::from_vars(|name| env::var(name).ok())
    }

    fn from_vars<F>(var: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = var(SEPARATOR_VAR) {
            let value = value.trim();
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (None, _) => {}
                (Some(separator), None) => return Self::with_separator(separator),
                (Some(first), Some(_)) => return Err(Error::UnsupportedSeparator(first)),
            }
        }

        let locale = LOCALE_VARS
            .iter()
            .filter_map(|name| var(*name))
            .find(|value| !value.is_empty());
        let separator = locale
            .as_deref()
            .and_then(locale_separator)
            .unwrap_or('.');
        debug!("locale {:?} uses '{}' as decimal separator", locale, separator);

        Ok(Self {
            separator,
            ..Self::default()
        })
    }

    /// Set the number of fractional digits kept by [`format`](#method.format)
    pub fn with_precision(self, precision: u8) -> Self {
        Self { precision, ..self }
    }

    /// Decimal separator
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Number of fractional digits results are rounded to
    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// Evaluate `input` with this configuration's separator
    pub fn eval(&self, input: &str) -> Result<f64, Error> {
        eval(input, self.separator)
    }

    /// Round `value` to `precision` fractional digits
    ///
    /// # Examples
    ///
    /// ```
    /// # use tally::Config;
    /// assert_eq!(Config::round(2.0 / 3.0, 2), 0.67);
    /// assert_eq!(Config::round(-0.001, 2), 0.0);
    /// ```
    pub fn round(value: f64, precision: u8) -> f64 {
        let factor = 10_f64.powi(i32::from(precision));
        let rounded = (value * factor).round() / factor;
        // No negative zero in the output
        if rounded == 0.0 {
            0.0
        } else {
            rounded
        }
    }

    /// Round `value` and render it with the configured separator
    ///
    /// # Examples
    ///
    /// ```
    /// # use tally::Config;
    /// let config = Config::with_separator(',').unwrap();
    /// assert_eq!(config.format(10.0 / 4.0), "2,5");
    /// assert_eq!(config.format(7.0), "7");
    /// ```
    pub fn format(&self, value: f64) -> String {
        let rendered = Self::round(value, self.precision).to_string();
        if self.separator == '.' {
            rendered
        } else {
            rendered.replace('.', &self.separator.to_string())
        }
    }
}
