//! Interactive prompts over any line-based input and text output.
//!
//! Production wires stdin/stdout; tests feed a byte slice and collect a `Vec<u8>`.
use std::io::{BufRead, Write};

use forex_common::crypto::CryptoTicker;
use forex_common::currency::{CurrencyDirectory, CurrencyRecord, normalize_input};
use forex_common::error::ConverterError;
use forex_common::result::Result;
use log::debug;

use crate::model::request::parse_amount;

/// Line-oriented dialogue with the user.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Creates a console over the given streams.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Gives back the output stream.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Writes `text` followed by a newline.
    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Shows `prompt` and reads one line (without the line terminator).
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ConverterError::InputClosed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Asks until the answer resolves to a known currency.
    pub fn ask_currency(
        &mut self,
        prompt: &str,
        directory: &CurrencyDirectory,
    ) -> Result<CurrencyRecord> {
        loop {
            let answer = self.ask(prompt)?;
            match directory.require(&answer) {
                Ok(record) => {
                    debug!("Resolved '{}' to {}", answer.trim(), record.iso);
                    return Ok(record.clone());
                }
                Err(ConverterError::CurrencyNotFound(name)) => {
                    self.say(&format!(
                        "\n\t\tWe could not find \"{}\" as a country, alias, or ISO code.\
                         \n\t\tPlease check the spelling and try again (e.g., United States, Japan, BTC).\n",
                        name
                    ))?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Asks until the answer is a valid non-negative amount.
    pub fn ask_amount(&mut self, currency: &CurrencyRecord) -> Result<(f64, bool)> {
        let prompt = format!(
            "\nHow much in {} would you like to convert?\n\tPlease enter ({}): ",
            currency.display_name, currency.symbol
        );
        loop {
            let answer = self.ask(&prompt)?;
            match parse_amount(&answer) {
                Ok(parsed) => return Ok(parsed),
                Err(e) => {
                    debug!("{}", e);
                    self.say("\n\tInvalid number. Please enter a valid numeric value (e.g., 1500.50).")?;
                }
            }
        }
    }

    /// Yes/no question; only `yes` (any case, surrounding spaces allowed) is affirmative.
    pub fn confirm(&mut self, prompt: &str) -> Result<bool> {
        Ok(normalize_input(&self.ask(prompt)?) == "yes")
    }

    /// Opening banner listing the supported cryptocurrencies.
    pub fn introduction(&mut self) -> Result<()> {
        let mut banner = String::from(
            "\nWELCOME TO THE FOREX CURRENCY CONVERTER\n\n\
             \tThis is an online tool that will convert from any national currency to any national currency, and\n\
             \tfrom any national currency to and from any of the top ten crypto currencies, in real time.  The\n\
             \tcrypto currencies included (in order of market capitalization as of June 2025) are:\n\n",
        );
        for (i, ticker) in CryptoTicker::all().enumerate() {
            banner.push_str(&format!("\t\t{:>4} {}\n", format!("({})", i + 1), ticker.display_name()));
        }
        banner.push_str(
            "\n\tYour printed results will include a date and time stamp for your records.\n\n\
             \tConversions are without consideration to bank fees or bank arbitrage across multiple currencies,\n\
             \tand so it offers a 'base case' for conversion of currencies without processing fees or bank forex\n\
             \tarbitrage with your funds.\n",
        );
        self.say(&banner)
    }

    /// Closing message.
    pub fn farewell(&mut self) -> Result<()> {
        self.say("Thank you for using the Forex Exchange App. We hope it has been helpful.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r#"{
        "united states": { "iso": "USD", "symbol": "$", "currency": "US Dollar" },
        "japan": { "iso": "JPY", "symbol": "¥", "currency": "Japanese Yen" }
    }"#;

    fn console(input: &str) -> Console<&[u8], Vec<u8>> {
        Console::new(input.as_bytes(), Vec::new())
    }

    fn output(console: Console<&[u8], Vec<u8>>) -> String {
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn test_ask_currency_reprompts_until_found() {
        let dir = CurrencyDirectory::from_reader(TABLE.as_bytes()).unwrap();
        let mut c = console("atlantis\n  JAPAN \n");
        let record = c.ask_currency("FROM? ", &dir).unwrap();
        assert_eq!(record.iso, "JPY");
        let out = output(c);
        assert!(out.contains("We could not find \"atlantis\""));
        assert_eq!(out.matches("FROM? ").count(), 2);
    }

    #[test]
    fn test_ask_amount_reprompts_on_garbage() {
        let dir = CurrencyDirectory::from_reader(TABLE.as_bytes()).unwrap();
        let yen = dir.resolve("jpy").unwrap().clone();
        let mut c = console("lots\n1500,50\r\n");
        assert_eq!(c.ask_amount(&yen).unwrap(), (1500.5, true));
        let out = output(c);
        assert!(out.contains("How much in Japanese Yen would you like to convert?"));
        assert!(out.contains("Invalid number."));
    }

    #[test]
    fn test_confirm() {
        let mut c = console(" YES \nyep\n");
        assert!(c.confirm("? ").unwrap());
        assert!(!c.confirm("? ").unwrap());
    }

    #[test]
    fn test_end_of_input() {
        let mut c = console("");
        assert!(matches!(c.ask("? "), Err(ConverterError::InputClosed)));
    }

    #[test]
    fn test_introduction_lists_all_coins() {
        let mut c = console("");
        c.introduction().unwrap();
        let out = output(c);
        assert!(out.contains("(1) Bitcoin"));
        assert!(out.contains("(10) TRON"));
    }
}
