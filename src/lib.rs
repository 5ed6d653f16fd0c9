mod command;
mod handle;
mod object;

use std::io::{self, Write};

use console::style;
use cooler_deployer_calculator::{error::CredentialError, re_exports::eyre};

pub use command::dispatch_commands;
pub use cooler_deployer_calculator as calculator;
pub use handle::{load_deployed_objects, publish_package, record_deployment};
pub use object::DeployedObjects;

/// Write a one-line diagnostic for a failed run, preceded by a remediation hint when one is known
pub fn report_failure<W: Write>(out: &mut W, report: &eyre::Report) -> io::Result<()> {
    if let Some(hint) = report
        .downcast_ref::<CredentialError>()
        .and_then(CredentialError::hint)
    {
        writeln!(out, "{} {hint}", style("[Error]").for_stderr().red().bold())?;
    }
    writeln!(out, "Error: {report:#}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reported(error: CredentialError) -> String {
        let mut out = Vec::new();
        report_failure(&mut out, &eyre::Report::new(error)).unwrap();
        console::strip_ansi_codes(&String::from_utf8(out).unwrap()).into_owned()
    }

    #[test]
    fn missing_seed_phrase_is_reported_with_hint() {
        let output = reported(CredentialError::MissingSeedPhrase);
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[Error] Please set up the mnemonic as SEED_PHRASE"));
        assert_eq!(lines[1], "Error: SEED_PHRASE not set as env variable.");
    }

    #[test]
    fn invalid_mnemonic_is_reported_without_hint() {
        let output = reported(CredentialError::InvalidMnemonic(
            "invalid mnemonic: unknown word".into(),
        ));
        assert_eq!(output, "Error: invalid mnemonic: unknown word\n");
    }
}
