//! Question-and-answer collection of a policy application.
//!
//! Reads one answer per line from any `BufRead` and writes prompts to any
//! `Write`, so the whole dialogue can be driven from a script in tests.
//! End of input at any prompt ends the interview with `Ok(None)`.

use std::io::{self, BufRead, Write};

use tracing::warn;

use crate::policy::{Claim, Customer, PolicyApplication, PolicyRecord};
use crate::premium::Coverage;
use crate::receipt::Receipt;
use crate::types::{PaymentMethod, Province};
use crate::validate::{validate_payment_method, validate_province};

/// Sentinel that ends the claims list, any case.
pub const END_OF_CLAIMS: &str = "done";

pub struct Interview<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Interview<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Interview { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{message}")
    }

    /// Prompts and returns the trimmed answer, `None` at end of input.
    pub fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Re-asks until `accept` returns a value, printing `complaint` after
    /// each rejected answer.
    fn ask_until<T>(
        &mut self,
        prompt: &str,
        complaint: &str,
        accept: impl Fn(&str) -> Option<T>,
    ) -> io::Result<Option<T>> {
        loop {
            let Some(answer) = self.ask(prompt)? else {
                return Ok(None);
            };
            if let Some(value) = accept(&answer) {
                return Ok(Some(value));
            }
            warn!(prompt, answer = %answer, "answer rejected");
            self.say(complaint)?;
        }
    }

    fn ask_yes_no(&mut self, prompt: &str) -> io::Result<Option<bool>> {
        Ok(self.ask(prompt)?.map(|a| a.eq_ignore_ascii_case("y")))
    }

    pub fn collect_application(&mut self) -> io::Result<Option<PolicyApplication>> {
        macro_rules! answer {
            ($e:expr) => {
                match $e? {
                    Some(v) => v,
                    None => return Ok(None),
                }
            };
        }

        let first_name = title_case(&answer!(self.ask("Enter customer's first name: ")));
        let last_name = title_case(&answer!(self.ask("Enter customer's last name: ")));
        let address = answer!(self.ask("Enter customer's address: "));
        let city = title_case(&answer!(self.ask("Enter customer's city: ")));
        let province = answer!(self.ask_until(
            "Enter customer's province: ",
            "Invalid province. Please enter again.",
            |a| validate_province(a).then(|| a.parse::<Province>().ok()).flatten(),
        ));
        let postal_code = answer!(self.ask("Enter customer's postal code: "));
        let phone_number = answer!(self.ask("Enter customer's phone number: "));

        let num_cars = answer!(self.ask_until(
            "Enter number of cars being insured: ",
            "Number of cars must be a whole number of at least 1. Please enter again.",
            |a| a.parse::<u32>().ok().filter(|n| *n >= 1),
        ));
        let coverage = Coverage {
            extra_liability: answer!(self.ask_yes_no("Extra liability coverage (Y/N): ")),
            glass_coverage: answer!(self.ask_yes_no("Glass coverage (Y/N): ")),
            loaner_car: answer!(self.ask_yes_no("Loaner car (Y/N): ")),
        };
        let payment_method = answer!(self.ask_until(
            "Payment method (Full/Monthly/Down Pay): ",
            "Invalid payment method. Please enter again.",
            |a| validate_payment_method(a).then(|| a.parse::<PaymentMethod>().ok()).flatten(),
        ));
        let down_payment = if payment_method == PaymentMethod::DownPay {
            answer!(self.ask_until(
                "Enter down payment amount: ",
                "Down payment must be a non-negative amount. Please enter again.",
                parse_amount,
            ))
        } else {
            0.0
        };

        let mut claims = Vec::new();
        loop {
            let claim_number = answer!(self.ask("Enter claim number (or 'done' to finish): "));
            if claim_number.eq_ignore_ascii_case(END_OF_CLAIMS) {
                break;
            }
            let claim_date = answer!(self.ask("Enter claim date (YYYY-MM-DD): "));
            let claim_amount = answer!(self.ask_until(
                "Enter claim amount: ",
                "Claim amount must be a non-negative amount. Please enter again.",
                parse_amount,
            ));
            claims.push(Claim { claim_number, claim_date, claim_amount });
        }

        Ok(Some(PolicyApplication {
            customer: Customer {
                first_name,
                last_name,
                address,
                city,
                province,
                postal_code,
                phone_number,
            },
            num_cars,
            coverage,
            payment_method,
            down_payment,
            claims,
        }))
    }

    pub fn show_receipt(&mut self, record: &PolicyRecord) -> io::Result<()> {
        writeln!(self.output)?;
        write!(self.output, "{}", Receipt(record))?;
        self.say("Policy data has been saved.")
    }

    /// Only an explicit `Y` continues; end of input stops.
    pub fn another_customer(&mut self) -> io::Result<bool> {
        Ok(self
            .ask_yes_no("Do you want to enter another customer? (Y/N): ")?
            .unwrap_or(false))
    }
}

fn parse_amount(answer: &str) -> Option<f64> {
    answer.parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0)
}

/// Upper-cases the first letter of every alphabetic run, lower-cases the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn interview(script: &str) -> Interview<Cursor<Vec<u8>>, Vec<u8>> {
        Interview::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    fn transcript(i: Interview<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(i.into_output()).unwrap()
    }

    const FULL_SCRIPT: &str = "\
dana
WHITFIELD
12 Water Street
st. john's
nl
A1C 1A1
709-555-0142
2
y
n
Y
full
C-1001
2023-02-14
1250
done
";

    #[test]
    fn title_case_matches_word_boundaries() {
        assert_eq!(title_case("mary-jane o'neil"), "Mary-Jane O'Neil");
        assert_eq!(title_case("ST. JOHN'S"), "St. John'S");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn collects_a_complete_application() {
        let mut i = interview(FULL_SCRIPT);
        let app = i.collect_application().unwrap().unwrap();

        assert_eq!(app.customer.first_name, "Dana");
        assert_eq!(app.customer.last_name, "Whitfield");
        assert_eq!(app.customer.city, "St. John'S");
        assert_eq!(app.customer.province, Province::NL);
        assert_eq!(app.num_cars, 2);
        assert_eq!(
            app.coverage,
            Coverage { extra_liability: true, glass_coverage: false, loaner_car: true }
        );
        assert_eq!(app.payment_method, PaymentMethod::Full);
        assert_eq!(app.down_payment, 0.0);
        assert_eq!(app.claims.len(), 1);
        assert_eq!(app.claims[0].claim_amount, 1250.0);
    }

    #[test]
    fn invalid_province_is_asked_again() {
        let script = FULL_SCRIPT.replacen("nl\n", "ontario\nXX\nnl\n", 1);
        let mut i = interview(&script);
        let app = i.collect_application().unwrap().unwrap();
        assert_eq!(app.customer.province, Province::NL);

        let out = transcript(i);
        assert_eq!(out.matches("Invalid province. Please enter again.").count(), 2);
    }

    #[test]
    fn invalid_payment_method_and_down_payment_are_asked_again() {
        let script = FULL_SCRIPT.replacen("full\n", "cash\ndown pay\n-5\nabc\n200\n", 1);
        let mut i = interview(&script);
        let app = i.collect_application().unwrap().unwrap();
        assert_eq!(app.payment_method, PaymentMethod::DownPay);
        assert_eq!(app.down_payment, 200.0);

        let out = transcript(i);
        assert_eq!(out.matches("Invalid payment method").count(), 1);
        assert_eq!(out.matches("Down payment must be").count(), 2);
    }

    #[test]
    fn rejected_answers_log_a_warning() {
        let script = FULL_SCRIPT.replacen("nl\n", "XX\nnl\n", 1);
        let (app, logs) = crate::log_capture::capture(tracing::Level::WARN, || {
            interview(&script).collect_application().unwrap()
        });

        assert!(app.is_some());
        assert!(logs.contains("WARN"), "expected a warning, got: {logs}");
        assert!(logs.contains("answer rejected"));
        assert!(logs.contains("XX"));
    }

    #[test]
    fn car_count_must_be_positive() {
        let script = FULL_SCRIPT.replacen("\n2\n", "\n0\ntwo\n3\n", 1);
        let mut i = interview(&script);
        let app = i.collect_application().unwrap().unwrap();
        assert_eq!(app.num_cars, 3);
        assert_eq!(transcript(i).matches("Number of cars must be").count(), 2);
    }

    #[test]
    fn anything_but_y_is_no() {
        let script = FULL_SCRIPT.replacen("y\nn\nY\n", "yes\n\nY\n", 1);
        let app = interview(&script).collect_application().unwrap().unwrap();
        assert!(!app.coverage.extra_liability);
        assert!(!app.coverage.glass_coverage);
        assert!(app.coverage.loaner_car);
    }

    #[test]
    fn done_ends_claims_in_any_case() {
        let script = FULL_SCRIPT.replacen("done\n", "DONE\n", 1);
        let app = interview(&script).collect_application().unwrap().unwrap();
        assert_eq!(app.claims.len(), 1);
    }

    #[test]
    fn end_of_input_abandons_the_application() {
        let truncated: String = FULL_SCRIPT.lines().take(9).map(|l| format!("{l}\n")).collect();
        assert!(interview(&truncated).collect_application().unwrap().is_none());
        assert!(interview("").collect_application().unwrap().is_none());
    }

    #[test]
    fn another_customer_requires_explicit_y() {
        assert!(interview("y\n").another_customer().unwrap());
        assert!(!interview("n\n").another_customer().unwrap());
        assert!(!interview("").another_customer().unwrap());
    }
}
