//! `isoprobe list` command handler

use std::io::Write;

use serde::Serialize;

use isoprobe_scenario::Scenario;

use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `list` command.
pub fn execute(writer: &OutputWriter) -> Result<(), CliError> {
    let list = ScenarioList {
        scenarios: Scenario::catalog(),
    };
    writer.render(&list)
}

/// Builtin scenario catalog.
#[derive(Serialize)]
pub struct ScenarioList {
    pub scenarios: Vec<Scenario>,
}

impl Render for ScenarioList {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Builtin scenarios:")?;
        for s in &self.scenarios {
            writeln!(w)?;
            writeln!(w, "  {} -- {}", s.name().bold(), s.label())?;
            writeln!(w, "    train:    {}", s.training_dataset())?;
            writeln!(w, "    test:     {}", s.test_dataset())?;
            writeln!(w, "    ntrees:   {}", s.ntrees())?;
            writeln!(w, "    expected: {} prediction rows", s.expected_rows())?;
        }
        Ok(())
    }
}
