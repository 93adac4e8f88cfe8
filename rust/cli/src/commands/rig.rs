use std::io::Write;

use luckydraw_engine::engine::DrawEngine;
use luckydraw_engine::rig::RigRuleId;

use crate::cli::RigCommand;
use crate::config::Config;
use crate::error::CliError;
use crate::formatters::format_rule;
use crate::store;
use crate::ui;

pub fn handle_rig_command(
    config: &Config,
    cmd: RigCommand,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let (store, mut engine) = store::open_engine(config, err)?;
    match cmd {
        RigCommand::Add { name, round } => {
            let id = engine.add_rig_rule(&name, round)?;
            let trimmed = name.trim();
            if !engine.original_names().iter().any(|n| n == trimmed) {
                ui::display_warning(err, &format!("{} is not in the applied names", trimmed))?;
            }
            if round <= engine.round_counter() {
                ui::display_warning(
                    err,
                    &format!("Round {} has already been drawn; the rule stays inert", round),
                )?;
            }
            writeln!(out, "Added rule {}: {} in round {}", id, trimmed, round)?;
            if !engine.rig_enabled() {
                writeln!(out, "Rigging is off; run `luckydraw rig on` to apply rules")?;
            }
        }
        RigCommand::Enable { id } => {
            set_enabled(&mut engine, &id, true)?;
            writeln!(out, "Rule {} enabled", id)?;
        }
        RigCommand::Disable { id } => {
            set_enabled(&mut engine, &id, false)?;
            writeln!(out, "Rule {} disabled", id)?;
        }
        RigCommand::Rm { id } => {
            let rule = engine
                .delete_rig_rule(&RigRuleId::from(id.as_str()))
                .ok_or_else(|| unknown_rule(&id))?;
            writeln!(out, "Removed rule {}: {} in round {}", rule.id, rule.name, rule.round)?;
        }
        RigCommand::List => {
            let rules = engine.rig_rules().list();
            if rules.is_empty() {
                writeln!(out, "No rig rules")?;
            }
            for rule in &rules {
                writeln!(out, "{}", format_rule(rule))?;
            }
            return Ok(());
        }
        RigCommand::On => {
            engine.set_rig_enabled(true);
            writeln!(out, "Rigging on")?;
        }
        RigCommand::Off => {
            engine.set_rig_enabled(false);
            writeln!(out, "Rigging off")?;
        }
    }
    store::persist(&store, &mut engine)?;
    Ok(())
}

fn set_enabled(engine: &mut DrawEngine, id: &str, enabled: bool) -> Result<(), CliError> {
    if engine.set_rig_rule_enabled(&RigRuleId::from(id), enabled) {
        Ok(())
    } else {
        Err(unknown_rule(id))
    }
}

fn unknown_rule(id: &str) -> CliError {
    CliError::InvalidInput(format!("no rig rule with id {}", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{output, temp_config};
    use crate::commands::{handle_apply_command, handle_draw_command};

    fn added_id(text: &str) -> String {
        text.trim_start_matches("Added rule ")
            .split(':')
            .next()
            .unwrap()
            .to_string()
    }

    #[test]
    fn rigged_name_wins_its_round() {
        let (_dir, config) = temp_config();
        let mut sink = Vec::new();
        let mut err = Vec::new();
        handle_apply_command(&config, None, Some("A,B,C,D".into()), &mut sink, &mut err).unwrap();
        let add = RigCommand::Add {
            name: "C".into(),
            round: 2,
        };
        handle_rig_command(&config, add, &mut sink, &mut err).unwrap();
        handle_rig_command(&config, RigCommand::On, &mut sink, &mut err).unwrap();

        let mut out = Vec::new();
        handle_draw_command(&config, &mut out, &mut err).unwrap();
        assert!(!output(out).contains('C'));
        let mut out = Vec::new();
        handle_draw_command(&config, &mut out, &mut err).unwrap();
        assert_eq!(output(out), "Round 2: C\n");
    }

    #[test]
    fn disable_and_remove_by_id() {
        let (_dir, config) = temp_config();
        let mut err = Vec::new();
        let mut out = Vec::new();
        let add = RigCommand::Add {
            name: " Zed ".into(),
            round: 1,
        };
        handle_rig_command(&config, add, &mut out, &mut err).unwrap();
        let text = output(out);
        assert!(text.contains(": Zed in round 1"));
        assert!(text.contains("Rigging is off"));
        assert!(output(err).contains("Zed is not in the applied names"));
        let id = added_id(text.lines().next().unwrap());

        let mut err = Vec::new();
        handle_rig_command(&config, RigCommand::Disable { id: id.clone() }, &mut Vec::new(), &mut err)
            .unwrap();
        let mut out = Vec::new();
        handle_rig_command(&config, RigCommand::List, &mut out, &mut err).unwrap();
        assert!(output(out).contains("(disabled)"));

        let mut out = Vec::new();
        handle_rig_command(&config, RigCommand::Rm { id: id.clone() }, &mut out, &mut err).unwrap();
        assert!(output(out).starts_with("Removed rule"));
        let e = handle_rig_command(&config, RigCommand::Rm { id }, &mut Vec::new(), &mut err);
        assert!(matches!(e, Err(CliError::InvalidInput(_))));

        let mut out = Vec::new();
        handle_rig_command(&config, RigCommand::List, &mut out, &mut err).unwrap();
        assert_eq!(output(out), "No rig rules\n");
    }

    #[test]
    fn round_zero_is_rejected() {
        let (_dir, config) = temp_config();
        let add = RigCommand::Add {
            name: "A".into(),
            round: 0,
        };
        let e = handle_rig_command(&config, add, &mut Vec::new(), &mut Vec::new()).unwrap_err();
        assert!(e.to_string().contains("Invalid rig round: 0"));
    }

    #[test]
    fn unknown_id_is_an_input_error() {
        let (_dir, config) = temp_config();
        let e = handle_rig_command(
            &config,
            RigCommand::Enable { id: "nope".into() },
            &mut Vec::new(),
            &mut Vec::new(),
        )
        .unwrap_err();
        assert_eq!(e.to_string(), "Invalid input: no rig rule with id nope");
    }
}
