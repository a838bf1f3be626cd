//! Plain-text rendering of results.

use std::fmt::Write;

use fine_core::calculations::{FineComparison, RegionResolution, WorkerIncome};
use fine_core::tables::{TeamEntry, region_name};
use fine_core::{CalculationOutcome, DeductionBreakdown, JurisdictionCode, PlayerRecord};
use rust_decimal::Decimal;

use crate::format::{format_currency, format_percent, format_rate};

const LABEL_WIDTH: usize = 24;

fn line(
    out: &mut String,
    label: &str,
    value: &str,
) {
    let _ = writeln!(out, "{label:<LABEL_WIDTH$}{value:>20}");
}

fn breakdown_lines(
    out: &mut String,
    breakdown: &DeductionBreakdown,
) {
    line(out, "Gross Salary", &format_currency(breakdown.gross_salary));
    for (kind, amount) in breakdown.deductions() {
        line(out, kind.label(), &format_currency(amount));
    }
    line(out, "Net Income", &format_currency(breakdown.net_income));
}

fn region_note(region: &RegionResolution) -> String {
    match region {
        RegionResolution::Rated(code) => format!("Region: {}", describe_region(*code)),
        RegionResolution::UnratedRegion(code) => {
            format!("Region: {} (no state tax applied)", describe_region(*code))
        }
        RegionResolution::UnknownTeam => "Region: team not found, state tax 0%".to_string(),
    }
}

fn describe_region(code: JurisdictionCode) -> String {
    match region_name(code) {
        Some(name) => format!("{name} ({code})"),
        None => code.to_string(),
    }
}

pub fn calculation(outcome: &CalculationOutcome) -> String {
    let mut out = String::new();
    let request = &outcome.request;

    let league = request.league.map(|l| l.as_str()).unwrap_or("no league");
    let _ = writeln!(out, "Team: {} ({league})", request.team);
    let _ = writeln!(out, "{}", region_note(&outcome.region));
    let _ = writeln!(out);

    breakdown_lines(&mut out, &outcome.breakdown);
    line(&mut out, "Fine", &format_currency(request.fine));
    line(&mut out, "Fine % of Net Income", &format_percent(outcome.fine_percentage));
    line(&mut out, "Remaining Net Income", &format_currency(outcome.remaining_net_income()));
    out
}

pub fn comparison(comparison: &FineComparison) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Athlete");
    breakdown_lines(&mut out, &comparison.athlete);
    line(&mut out, "Fine", &format_currency(comparison.fine));
    line(&mut out, "Fine % of Net Income", &format_percent(comparison.fine_percentage));
    line(&mut out, "Remaining Net Income", &format_currency(comparison.athlete_remaining()));

    let _ = writeln!(out);
    let _ = writeln!(out, "You");
    breakdown_lines(&mut out, &comparison.worker);
    line(&mut out, "Equivalent Fine", &format_currency(comparison.equivalent_fine));
    line(&mut out, "Remaining Net Income", &format_currency(comparison.worker_remaining()));
    out
}

pub fn income(income: &WorkerIncome) -> String {
    match income {
        WorkerIncome::Salary(salary) => format!("{} per year", format_currency(*salary)),
        WorkerIncome::Hourly {
            wage,
            hours_per_week,
        } => format!(
            "{} per hour, {} hours per week",
            format_currency(*wage),
            hours_per_week.normalize()
        ),
    }
}

pub fn names(names: &[String]) -> String {
    names.iter().fold(String::new(), |mut out, name| {
        let _ = writeln!(out, "{name}");
        out
    })
}

pub fn players(players: &[&PlayerRecord]) -> String {
    if players.is_empty() {
        return "No players found.\n".to_string();
    }
    let mut out = String::new();
    for player in players {
        let league = player.league.map(|l| l.as_str()).unwrap_or("-");
        let _ = writeln!(
            out,
            "{:<28}{:<6}{:>20}",
            player.name,
            league,
            format_currency(player.gross_salary)
        );
    }
    out
}

pub fn team_catalogue(teams: &[TeamEntry]) -> String {
    teams.iter().fold(String::new(), |mut out, team| {
        let _ = writeln!(out, "{:<5}{:<28}{}", team.abbreviation, team.name, team.region);
        out
    })
}

pub fn states(regions: &[(JurisdictionCode, &'static str, Decimal)]) -> String {
    regions
        .iter()
        .fold(String::new(), |mut out, (code, name, rate)| {
            let _ = writeln!(out, "{code:<4}{name:<24}{:>8}", format_rate(*rate));
            out
        })
}
