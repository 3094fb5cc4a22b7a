use std::process::ExitCode;

use clap::Parser;
use product_api::auth::password;
use product_api::AuthError;

/// Produce or check a bcrypt hash for the HASHED_PASSWORD setting.
#[derive(Debug, Parser)]
#[command(name = "hash-password")]
struct Args {
    /// Plaintext password
    password: String,

    /// bcrypt cost factor
    #[arg(short, long, default_value_t = bcrypt::DEFAULT_COST)]
    cost: u32,

    /// Check the password against this hash instead of producing one
    #[arg(long, value_name = "HASH")]
    verify: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Hashed(String),
    Match,
    NoMatch,
}

impl Outcome {
    fn succeeded(&self) -> bool {
        !matches!(self, Outcome::NoMatch)
    }
}

fn run(args: Args) -> Result<Outcome, AuthError> {
    match args.verify {
        Some(hash) if password::verify(&args.password, hash.trim()) => Ok(Outcome::Match),
        Some(_) => Ok(Outcome::NoMatch),
        None => password::hash(&args.password, args.cost).map(Outcome::Hashed),
    }
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(outcome) => {
            match &outcome {
                Outcome::Hashed(hash) => println!("{hash}"),
                Outcome::Match => println!("match"),
                Outcome::NoMatch => println!("no match"),
            }
            if outcome.succeeded() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("hash-password").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn hashes_with_requested_cost() {
        let Outcome::Hashed(hash) = run(args(&["secret", "--cost", "4"])).unwrap() else {
            panic!("expected a hash");
        };
        assert_eq!(password::cost_of(&hash), Some(4));
        assert!(password::verify("secret", &hash));
    }

    #[test]
    fn verify_mode_reports_match_and_succeeds() {
        let hash = password::hash("secret", 4).unwrap();
        let outcome = run(args(&["secret", "--verify", &format!("  {hash}\n")])).unwrap();
        assert_eq!(outcome, Outcome::Match);
        assert!(outcome.succeeded());
    }

    #[test]
    fn verify_mode_mismatch_fails() {
        let hash = password::hash("secret", 4).unwrap();
        let outcome = run(args(&["wrong", "--verify", &hash])).unwrap();
        assert_eq!(outcome, Outcome::NoMatch);
        assert!(!outcome.succeeded());

        let outcome = run(args(&["secret", "--verify", "garbage"])).unwrap();
        assert_eq!(outcome, Outcome::NoMatch);
    }

    #[test]
    fn invalid_cost_is_an_error() {
        assert!(matches!(
            run(args(&["secret", "--cost", "2"])),
            Err(AuthError::HashingFailure(_))
        ));
    }
}
