//! Plain-text rendering of the list and detail display models.

use std::fmt;

use crate::core::display::{VehicleDisplayModel, CLAUSE_SEPARATOR};
use crate::core::search::SummaryCard;

/// Result counter followed by one line per card.
pub struct ListText<'a> {
    pub cards: &'a [SummaryCard],
    pub count_label: &'a str,
}

impl fmt::Display for ListText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.count_label)?;
        for card in self.cards {
            write!(f, "  [{}] {} {} {}", card.id, card.year_label, card.make, card.model)?;
            if let Some(drivetrain) = &card.drivetrain {
                write!(f, " ({})", drivetrain)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Detail page sections in display order.
pub struct DetailText<'a>(pub &'a VehicleDisplayModel);

impl fmt::Display for DetailText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display = self.0;
        writeln!(f, "{}", display.title)?;

        let badges: Vec<&str> = display
            .drivetrains
            .iter()
            .map(String::as_str)
            .chain(display.body_style.as_deref())
            .chain(display.trim_count_label.as_deref())
            .collect();
        if !badges.is_empty() {
            writeln!(f, "{}", badges.join(CLAUSE_SEPARATOR))?;
        }

        writeln!(f, "\nOverview")?;
        writeln!(f, "  Years: {}", display.year_label)?;
        writeln!(f, "  Make: {}", display.make)?;
        writeln!(f, "  Model: {}", display.model)?;
        if let Some(drivetrain) = &display.drivetrain_label {
            writeln!(f, "  Drivetrain: {}", drivetrain)?;
        }

        if !display.engines.is_empty() {
            writeln!(f, "\nPowertrain Options")?;
            for engine in &display.engines {
                match &engine.output_label {
                    Some(output) => writeln!(f, "  - {} ({})", engine.name, output)?,
                    None => writeln!(f, "  - {}", engine.name)?,
                }
            }
        }

        if !display.trims.is_empty() {
            writeln!(f, "\nAvailable Trims")?;
            writeln!(f, "  {}", display.trims.join(", "))?;
        }

        writeln!(f, "\nFluids")?;
        section_placeholder(f, display.fluids_placeholder)?;
        for fluid in &display.fluids {
            write!(f, "  - {}: {}", fluid.system, fluid.spec)?;
            if let Some(capacity) = &fluid.capacity_label {
                write!(f, " ({})", capacity)?;
            }
            writeln!(f)?;
            if let Some(notes) = &fluid.notes {
                writeln!(f, "    {}", notes)?;
            }
        }

        writeln!(f, "\nMaintenance Schedule")?;
        section_placeholder(f, display.maintenance_placeholder)?;
        for item in &display.maintenance {
            write!(f, "  - {}", item.name)?;
            if let Some(code) = &item.code {
                write!(f, " [{}]", code)?;
            }
            if let Some(severity) = item.severity_label {
                write!(f, " <{}>", severity)?;
            }
            writeln!(f)?;
            if let Some(details) = &item.details {
                writeln!(f, "    {}", details)?;
            }
            if let Some(interval) = &item.interval_label {
                writeln!(f, "    {}", interval)?;
            }
        }

        writeln!(f, "\nCommon Issues")?;
        section_placeholder(f, display.issues_placeholder)?;
        for issue in &display.issues {
            write!(f, "  - {} <{}>", issue.title, issue.severity_label)?;
            if let Some(reported) = &issue.reported_label {
                write!(f, " {}", reported)?;
            }
            writeln!(f)?;
            if let Some(details) = &issue.details {
                writeln!(f, "    {}", details)?;
            }
        }

        Ok(())
    }
}

fn section_placeholder(f: &mut fmt::Formatter<'_>, placeholder: Option<&str>) -> fmt::Result {
    match placeholder {
        Some(message) => writeln!(f, "  {}", message),
        None => Ok(()),
    }
}

pub fn render_list(cards: &[SummaryCard], count_label: &str) -> String {
    ListText { cards, count_label }.to_string()
}

pub fn render_detail(display: &VehicleDisplayModel) -> String {
    DetailText(display).to_string()
}
