use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Key under which the net income is reported next to the deductions.
pub const NET_INCOME_KEY: &str = "Net Income";

/// Every deduction the engine knows how to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DeductionKind {
    Federal,
    State,
    Escrow,
    JockTax,
    #[serde(rename = "FICAMedicare")]
    FicaMedicare,
    AgentFee,
}

impl DeductionKind {
    pub const ALL: [DeductionKind; 6] = [
        DeductionKind::Federal,
        DeductionKind::State,
        DeductionKind::Escrow,
        DeductionKind::JockTax,
        DeductionKind::FicaMedicare,
        DeductionKind::AgentFee,
    ];

    /// Wire name used in the deduction mapping.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Federal => "Federal",
            Self::State => "State",
            Self::Escrow => "Escrow",
            Self::JockTax => "JockTax",
            Self::FicaMedicare => "FICAMedicare",
            Self::AgentFee => "AgentFee",
        }
    }

    /// Human-readable label for reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Federal => "Federal Tax",
            Self::State => "State Tax",
            Self::Escrow => "Escrow",
            Self::JockTax => "Jock Tax",
            Self::FicaMedicare => "FICA Medicare",
            Self::AgentFee => "Agent Fee",
        }
    }
}

/// Flat holdbacks applied to basketball and football contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueDeductionRates {
    pub escrow: Decimal,
    pub jock_tax: Decimal,
    pub fica_medicare: Decimal,
}

impl LeagueDeductionRates {
    /// Escrow 10%, jock tax 2%, FICA Medicare 1.45%.
    pub fn standard() -> Self {
        Self {
            escrow: Decimal::new(10, 2),
            jock_tax: Decimal::new(2, 2),
            fica_medicare: Decimal::new(145, 4),
        }
    }
}

/// The flat-rate deductions resolved for one income context.
///
/// Federal tax is not a flat rate and is never stored here; [`entries`]
/// reports it as a zero placeholder so callers see the full key set.
///
/// [`entries`]: DeductionRates::entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionRates {
    pub state: Decimal,
    pub league: Option<LeagueDeductionRates>,
    pub agent_fee: Option<Decimal>,
}

impl DeductionRates {
    /// Rate for `kind`, or `None` when the deduction does not apply.
    pub fn rate(
        &self,
        kind: DeductionKind,
    ) -> Option<Decimal> {
        match kind {
            DeductionKind::Federal => Some(Decimal::ZERO),
            DeductionKind::State => Some(self.state),
            DeductionKind::Escrow => self.league.map(|l| l.escrow),
            DeductionKind::JockTax => self.league.map(|l| l.jock_tax),
            DeductionKind::FicaMedicare => self.league.map(|l| l.fica_medicare),
            DeductionKind::AgentFee => self.agent_fee,
        }
    }

    /// All applicable `(kind, rate)` pairs, starting with the federal placeholder.
    pub fn entries(&self) -> Vec<(DeductionKind, Decimal)> {
        DeductionKind::ALL
            .into_iter()
            .filter_map(|kind| self.rate(kind).map(|rate| (kind, rate)))
            .collect()
    }
}

/// Amounts produced by the deduction engine for one gross salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeductionBreakdown {
    pub gross_salary: Decimal,
    pub federal: Decimal,
    pub state: Decimal,
    pub escrow: Option<Decimal>,
    pub jock_tax: Option<Decimal>,
    pub fica_medicare: Option<Decimal>,
    pub agent_fee: Option<Decimal>,
    pub net_income: Decimal,
}

impl DeductionBreakdown {
    pub(crate) fn empty(gross_salary: Decimal) -> Self {
        Self {
            gross_salary,
            federal: Decimal::ZERO,
            state: Decimal::ZERO,
            escrow: None,
            jock_tax: None,
            fica_medicare: None,
            agent_fee: None,
            net_income: gross_salary,
        }
    }

    pub(crate) fn set(
        &mut self,
        kind: DeductionKind,
        amount: Decimal,
    ) {
        match kind {
            DeductionKind::Federal => self.federal = amount,
            DeductionKind::State => self.state = amount,
            DeductionKind::Escrow => self.escrow = Some(amount),
            DeductionKind::JockTax => self.jock_tax = Some(amount),
            DeductionKind::FicaMedicare => self.fica_medicare = Some(amount),
            DeductionKind::AgentFee => self.agent_fee = Some(amount),
        }
    }

    pub fn amount(
        &self,
        kind: DeductionKind,
    ) -> Option<Decimal> {
        match kind {
            DeductionKind::Federal => Some(self.federal),
            DeductionKind::State => Some(self.state),
            DeductionKind::Escrow => self.escrow,
            DeductionKind::JockTax => self.jock_tax,
            DeductionKind::FicaMedicare => self.fica_medicare,
            DeductionKind::AgentFee => self.agent_fee,
        }
    }

    /// Applied deductions in reporting order.
    pub fn deductions(&self) -> Vec<(DeductionKind, Decimal)> {
        DeductionKind::ALL
            .into_iter()
            .filter_map(|kind| self.amount(kind).map(|amount| (kind, amount)))
            .collect()
    }

    pub fn total_deductions(&self) -> Decimal {
        self.deductions().into_iter().map(|(_, amount)| amount).sum()
    }

    /// Net income left once `fine` has been paid.
    pub fn remaining_after_fine(
        &self,
        fine: Decimal,
    ) -> Decimal {
        self.net_income - fine
    }

    /// Wire form: deduction name → amount, plus `"Net Income"`.
    pub fn to_map(&self) -> BTreeMap<String, Decimal> {
        let mut map: BTreeMap<String, Decimal> = self
            .deductions()
            .into_iter()
            .map(|(kind, amount)| (kind.as_str().to_string(), amount))
            .collect();
        map.insert(NET_INCOME_KEY.to_string(), self.net_income);
        map
    }
}
