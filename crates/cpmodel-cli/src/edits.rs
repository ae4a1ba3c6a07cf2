//! Mutations a curation run applies to recovered bundles.
//!
//! `--period LABEL=SECS` sets the period of every candidate under the
//! self-loop inbound identities of `LABEL`. `--state LABEL:KEY=VALUE` sets
//! one entry in the state block of a stateful function.

use std::str::FromStr;

use cpmodel_core::{CompPattern, InitBundle};

use crate::error::CliError;

#[derive(Debug, Clone, PartialEq)]
pub struct PeriodEdit {
    pub label: String,
    pub period: f64,
}

impl FromStr for PeriodEdit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (label, secs) = s
            .split_once('=')
            .ok_or_else(|| format!("expected LABEL=SECS, got '{s}'"))?;
        if label.is_empty() {
            return Err(format!("empty label in '{s}'"));
        }
        let period: f64 = secs
            .trim()
            .parse()
            .map_err(|_| format!("invalid period '{secs}'"))?;
        Ok(PeriodEdit {
            label: label.to_string(),
            period,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateEdit {
    pub label: String,
    pub key: String,
    pub value: String,
}

impl FromStr for StateEdit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || format!("expected LABEL:KEY=VALUE, got '{s}'");
        let (label, rest) = s.split_once(':').ok_or_else(malformed)?;
        let (key, value) = rest.split_once('=').ok_or_else(malformed)?;
        if label.is_empty() || key.is_empty() {
            return Err(malformed());
        }
        Ok(StateEdit {
            label: label.to_string(),
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

/// Applies `edit` to `bundle`. Returns the number of candidates changed.
pub fn apply_period(
    pattern: &CompPattern,
    bundle: &mut InitBundle,
    edit: &PeriodEdit,
) -> Result<usize, CliError> {
    let inbounds: Vec<_> = pattern
        .self_loops()
        .filter(|e| e.src_label == edit.label)
        .map(|e| e.inbound())
        .collect();
    if inbounds.is_empty() {
        return Err(CliError::NoSelfLoop {
            label: edit.label.clone(),
        });
    }

    let mut changed = 0;
    bundle.update_table(&edit.label, |table| {
        for inbound in &inbounds {
            let n = table
                .responses()
                .map(|r| r.candidates(inbound).len())
                .unwrap_or(0);
            // With nothing to change, index 0 surfaces the table's own error.
            for index in 0..n.max(1) {
                table.set_period(inbound, index, edit.period)?;
                changed += 1;
            }
        }
        Ok(())
    })?;
    Ok(changed)
}

/// Applies `edit` to the state block of a stateful function in `bundle`.
pub fn apply_state(bundle: &mut InitBundle, edit: &StateEdit) -> Result<(), CliError> {
    bundle.update_table(&edit.label, |table| {
        table.state_mut()?.set(edit.key.as_str(), edit.value.as_str());
        Ok(())
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpmodel_core::{CoreError, Format, InboundId};

    use crate::scenarios;

    #[test]
    fn parse_period() {
        let edit: PeriodEdit = "src=2.5".parse().unwrap();
        assert_eq!(edit.label, "src");
        assert_eq!(edit.period, 2.5);
        assert!("src".parse::<PeriodEdit>().is_err());
        assert!("=1".parse::<PeriodEdit>().is_err());
        assert!("src=fast".parse::<PeriodEdit>().is_err());
    }

    #[test]
    fn parse_state() {
        let edit: StateEdit = "branch:threshold=0.75".parse().unwrap();
        assert_eq!(
            edit,
            StateEdit {
                label: "branch".into(),
                key: "threshold".into(),
                value: "0.75".into(),
            }
        );
        assert!("branch=1".parse::<StateEdit>().is_err());
        assert!("branch:=1".parse::<StateEdit>().is_err());
    }

    #[test]
    fn period_edit_on_self_loop() {
        let (cp, mut bundle) = scenarios::rsa_chain(Format::Json).unwrap();
        let edit = PeriodEdit {
            label: "src".into(),
            period: 0.25,
        };
        assert_eq!(apply_period(&cp, &mut bundle, &edit).unwrap(), 1);

        let table = bundle.table("src").unwrap();
        let inbound = InboundId::new("src", "initiate");
        assert_eq!(table.responses().unwrap().candidates(&inbound)[0].period, 0.25);
    }

    #[test]
    fn period_edit_needs_self_loop() {
        let (cp, mut bundle) = scenarios::rsa_chain(Format::Json).unwrap();
        let edit = PeriodEdit {
            label: "sink".into(),
            period: 1.0,
        };
        assert!(matches!(
            apply_period(&cp, &mut bundle, &edit),
            Err(CliError::NoSelfLoop { .. })
        ));
    }

    #[test]
    fn negative_period_rejected() {
        let (cp, mut bundle) = scenarios::rsa_chain(Format::Json).unwrap();
        let edit = PeriodEdit {
            label: "src".into(),
            period: -1.0,
        };
        assert!(matches!(
            apply_period(&cp, &mut bundle, &edit),
            Err(CliError::Core(CoreError::InvalidPeriod { .. }))
        ));
    }

    #[test]
    fn state_edit_refreshes_snapshot() {
        let (_, mut bundle) = scenarios::branch_chain(Format::Yaml).unwrap();
        let edit: StateEdit = "branch:visits=7".parse().unwrap();
        apply_state(&mut bundle, &edit).unwrap();
        assert_eq!(
            bundle.state_snapshot("branch").unwrap().get("visits"),
            Some("7")
        );

        let edit: StateEdit = "gen:visits=7".parse().unwrap();
        assert!(matches!(
            apply_state(&mut bundle, &edit),
            Err(CliError::Core(CoreError::NotApplicable { .. }))
        ));
    }
}
