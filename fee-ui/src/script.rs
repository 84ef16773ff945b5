//! Line-oriented front end for pipes and scripts.
//!
//! Each input line is one command; the panel is printed after every edit
//! and every applied response. When input ends, outstanding calls are
//! awaited so the last answer is still printed.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use crate::{
    controller::{FeeFormController, FormEvent},
    view::render_text,
};

pub const HELP: &str = "\
commands:
  price <amount>   set the base price (empty clears it)
  type <name>      set the vehicle type (Common, Luxury; empty clears it)
  show             print the current panel
  quit             exit";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Event(FormEvent),
    Show,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    match word.to_ascii_lowercase().as_str() {
        "price" | "p" => Command::Event(FormEvent::BasePriceInput(rest.to_string())),
        "type" | "t" => Command::Event(FormEvent::VehicleTypeInput(rest.to_string())),
        "" | "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    }
}

/// Runs commands from `input` until `quit` or end of input, writing the
/// panel to `out`.
pub async fn run_script<R, W>(
    controller: &mut FeeFormController,
    input: R,
    out: &mut W,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    if controller.outstanding() > 0 {
                        debug!(outstanding = controller.outstanding(), "input closed; waiting for fee responses");
                        controller.settle().await;
                        write!(out, "{}", render_text(controller.form()))?;
                    }
                    break;
                };
                match parse_command(&line) {
                    Command::Event(event) => {
                        controller.handle(event);
                        write!(out, "{}", render_text(controller.form()))?;
                    }
                    Command::Show => write!(out, "{}", render_text(controller.form()))?,
                    Command::Help => writeln!(out, "{HELP}")?,
                    Command::Quit => break,
                    Command::Unknown(word) => warn!(command = %word, "unknown command; try `help`"),
                }
            }
            Some(status) = controller.next_completion(), if controller.outstanding() > 0 => {
                debug!(?status, "fee response handled");
                write!(out, "{}", render_text(controller.form()))?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{sync::Arc, time::Duration};

    use async_trait::async_trait;
    use fee_core::{FeeClient, FeeClientError, FeeResult, Fees, VehicleType};
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    /// Answers after a short pause with the reference breakdown.
    struct SlowClient(Duration);

    #[async_trait]
    impl FeeClient for SlowClient {
        async fn calculate_fees(
            &self,
            _base_price: Decimal,
            _vehicle_type: VehicleType,
        ) -> Result<FeeResult, FeeClientError> {
            tokio::time::sleep(self.0).await;
            Ok(FeeResult {
                fees: Fees {
                    basic_buyer_fee: dec!(50),
                    special_fee: dec!(20),
                    association_fee: dec!(10),
                    storage_fee: dec!(100),
                },
                total_cost: dec!(1180),
            })
        }
    }

    async fn run(input: &str) -> (FeeFormController, String) {
        let mut controller =
            FeeFormController::new(Arc::new(SlowClient(Duration::from_millis(50))));
        let mut out = Vec::new();
        run_script(&mut controller, input.as_bytes(), &mut out)
            .await
            .unwrap();
        (controller, String::from_utf8(out).unwrap())
    }

    #[test]
    fn price_command_carries_raw_text() {
        assert_eq!(
            parse_command("price 1,000"),
            Command::Event(FormEvent::BasePriceInput("1,000".into()))
        );
    }

    #[test]
    fn bare_price_clears() {
        assert_eq!(
            parse_command("  price  "),
            Command::Event(FormEvent::BasePriceInput(String::new()))
        );
    }

    #[test]
    fn type_command_is_case_insensitive_keyword() {
        assert_eq!(
            parse_command("TYPE Luxury"),
            Command::Event(FormEvent::VehicleTypeInput("Luxury".into()))
        );
    }

    #[test]
    fn unknown_words_are_reported() {
        assert_eq!(parse_command("bid 5"), Command::Unknown("bid".into()));
        assert_eq!(parse_command(""), Command::Show);
        assert_eq!(parse_command("q"), Command::Quit);
        assert_eq!(parse_command("html"), Command::Unknown("html".into()));
    }

    #[tokio::test]
    async fn end_of_input_waits_for_the_last_response() {
        let (controller, out) = run("type Common\nprice 1000\n").await;

        assert_eq!(controller.outstanding(), 0);
        assert_eq!(
            controller.form().result().map(|r| r.total_cost),
            Some(dec!(1180))
        );
        assert!(out.contains("$1180.00"), "{out}");
    }

    #[tokio::test]
    async fn quit_stops_before_later_commands() {
        let (controller, out) = run("type Luxury\nquit\nprice 1000\n").await;

        assert_eq!(controller.form().base_price(), None);
        assert!(out.contains("Luxury"), "{out}");
        assert!(!out.contains("$1180.00"), "{out}");
    }

    #[tokio::test]
    async fn clearing_before_end_of_input_prints_empty_panel() {
        let (controller, out) = run("type Common\nprice 1000\nprice\n").await;

        assert_eq!(controller.outstanding(), 0);
        assert_eq!(controller.form().result(), None);
        assert!(!out.contains("$1180.00"), "{out}");
    }
}
