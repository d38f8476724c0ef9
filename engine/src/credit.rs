//! Farmer credit scoring
//!
//! Four 0-100 sub-scores (soil, yields, insurance track record, market
//! access) are weighted into a 0-1000 score that selects the loan tier.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, info};

use crate::config::{CreditSettings, CreditTier, EngineConfig};
use crate::error::{
    ensure_in_range, ensure_non_negative, ensure_positive, EngineError, EngineResult,
};
use crate::models::{
    CreditInput, CreditRiskLevel, CreditSubScores, FarmerCreditScore, InsuranceHistory,
    MarketAccessData, SoilSuitability, YieldData, YieldTrend,
};
use crate::pricing::checked_product;
use crate::soil::NEUTRAL_SOIL_SCORE;
use crate::types::{Crop, Language};

/// Sub-score weights in percent
const SOIL_WEIGHT: u32 = 25;
const YIELD_WEIGHT: u32 = 25;
const INSURANCE_WEIGHT: u32 = 30;
const MARKET_WEIGHT: u32 = 20;

/// Weighted overall score on the 0-1000 scale.
///
/// Weights are applied as integer percentages; an exact half such as 76.5
/// rounds away from zero.
pub fn overall_score(sub_scores: &CreditSubScores) -> u32 {
    let weighted = (f64::from(SOIL_WEIGHT) * sub_scores.soil_quality
        + f64::from(YIELD_WEIGHT) * sub_scores.historical_yields
        + f64::from(INSURANCE_WEIGHT) * sub_scores.insurance_history
        + f64::from(MARKET_WEIGHT) * sub_scores.market_access)
        / 100.0;
    (weighted.round().clamp(0.0, 100.0) as u32) * 10
}

#[derive(Debug, Clone)]
pub struct CreditScorer {
    settings: CreditSettings,
    repayment_overrides: BTreeMap<Crop, u32>,
}

impl CreditScorer {
    pub fn new(settings: CreditSettings, repayment_overrides: BTreeMap<Crop, u32>) -> Self {
        Self {
            settings,
            repayment_overrides,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        let overrides = config
            .crops
            .iter()
            .filter_map(|(crop, profile)| profile.repayment_months.map(|m| (*crop, m)))
            .collect();
        Self::new(config.credit.clone(), overrides)
    }

    pub fn score(&self, input: &CreditInput) -> EngineResult<FarmerCreditScore> {
        validate_input(input)?;
        let language = input.language;
        let mut warnings = Vec::new();

        let (soil_quality, suitability) = match &input.soil {
            Some(soil) => (
                soil.quality_score,
                SoilSuitability::from_score(soil.quality_score),
            ),
            None => {
                warnings.push(missing_data_warning(language, MissingData::Soil));
                (
                    NEUTRAL_SOIL_SCORE,
                    SoilSuitability::from_score(NEUTRAL_SOIL_SCORE),
                )
            }
        };

        let insurance = match &input.insurance {
            Some(history) => history.clone(),
            None => {
                warnings.push(missing_data_warning(language, MissingData::Insurance));
                InsuranceHistory::default()
            }
        };

        let market_access = match &input.market {
            Some(market) => market_score(market),
            None => {
                warnings.push(missing_data_warning(language, MissingData::Market));
                market_score_unknown()
            }
        };

        let sub_scores = CreditSubScores {
            soil_quality,
            historical_yields: yield_score(&input.yields),
            insurance_history: insurance_score(&insurance),
            market_access,
        };
        let overall_score = overall_score(&sub_scores);
        let (risk_level, tier) = self.tier(overall_score);

        let expected_harvest = Decimal::try_from(input.farm_size * input.yields.average_yield)
            .map_err(|e| {
                EngineError::invalid("farm_size", format!("cannot be represented: {}", e))
            })?;
        let eligible_amount = checked_product(&[
            expected_harvest,
            self.settings.amount_per_tonne,
            tier.amount_multiplier,
        ])?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
        let repayment_period = self.repayment_period(&input.crop_type, risk_level);

        let recommendation = recommendation(
            language,
            risk_level,
            suitability,
            insurance.payment_reliability,
            eligible_amount,
            repayment_period,
            tier.interest_rate,
        );

        info!(
            crop_type = %input.crop_type,
            overall_score,
            %risk_level,
            %eligible_amount,
            "Scored farmer credit"
        );
        debug!(?sub_scores, "Credit sub-scores");

        Ok(FarmerCreditScore {
            overall_score,
            sub_scores,
            risk_level,
            eligible_amount,
            interest_rate: tier.interest_rate,
            repayment_period,
            recommendation,
            warnings,
        })
    }

    fn tier(&self, overall_score: u32) -> (CreditRiskLevel, &CreditTier) {
        if overall_score >= self.settings.low_risk.min_score {
            (CreditRiskLevel::Low, &self.settings.low_risk)
        } else if overall_score >= self.settings.medium_risk.min_score {
            (CreditRiskLevel::Medium, &self.settings.medium_risk)
        } else {
            (CreditRiskLevel::High, &self.settings.high_risk)
        }
    }

    fn repayment_period(&self, crop_type: &str, risk_level: CreditRiskLevel) -> u32 {
        let base = Crop::parse(crop_type)
            .and_then(|crop| self.repayment_overrides.get(&crop).copied())
            .unwrap_or(self.settings.base_repayment_months);
        match risk_level {
            CreditRiskLevel::Low => base + self.settings.low_risk_extension_months,
            CreditRiskLevel::Medium => base,
            CreditRiskLevel::High => base
                .saturating_sub(self.settings.high_risk_reduction_months)
                .max(self.settings.min_repayment_months),
        }
    }
}

fn validate_input(input: &CreditInput) -> EngineResult<()> {
    ensure_positive("farm_size", input.farm_size)?;
    ensure_non_negative("yields.average_yield", input.yields.average_yield)?;
    ensure_in_range("yields.reliability_score", input.yields.reliability_score, 0.0, 100.0)?;
    if let Some(soil) = &input.soil {
        ensure_in_range("soil.quality_score", soil.quality_score, 0.0, 100.0)?;
    }
    if let Some(insurance) = &input.insurance {
        ensure_in_range(
            "insurance.payment_reliability",
            insurance.payment_reliability,
            0.0,
            100.0,
        )?;
    }
    if let Some(market) = &input.market {
        ensure_non_negative("market.distance_to_market", market.distance_to_market)?;
        ensure_non_negative("market.transport_cost", market.transport_cost)?;
    }
    Ok(())
}

fn yield_score(yields: &YieldData) -> f64 {
    let level = match yields.average_yield {
        y if y > 2.0 => 40.0,
        y if y > 1.5 => 32.0,
        y if y > 1.0 => 24.0,
        y if y > 0.5 => 16.0,
        _ => 8.0,
    };
    let trend = match yields.trend {
        YieldTrend::Increasing => 30.0,
        YieldTrend::Stable => 20.0,
        YieldTrend::Decreasing => 5.0,
    };
    let reliability = yields.reliability_score / 100.0 * 30.0;
    (level + trend + reliability).min(100.0)
}

fn insurance_score(history: &InsuranceHistory) -> f64 {
    let payments = 40.0 * history.payment_reliability / 100.0;
    let seniority = f64::from(history.years_with_insurance.saturating_mul(5).min(25));
    let claim_ratio =
        f64::from(history.claims_submitted) / f64::from(history.total_policies.max(1));
    let claims = if claim_ratio < 0.1 {
        20.0
    } else if claim_ratio < 0.2 {
        15.0
    } else if claim_ratio < 0.3 {
        10.0
    } else {
        5.0
    };
    let active = if history.active_policies > 0 { 15.0 } else { 0.0 };
    (payments + seniority + claims + active).min(100.0)
}

fn market_score(market: &MarketAccessData) -> f64 {
    let distance = match market.distance_to_market {
        d if d < 5.0 => 25.0,
        d if d < 10.0 => 20.0,
        d if d < 20.0 => 15.0,
        d if d < 50.0 => 10.0,
        _ => 5.0,
    };
    let transport = match market.transport_cost {
        c if c < 10.0 => 20.0,
        c if c < 25.0 => 15.0,
        c if c < 50.0 => 10.0,
        _ => 5.0,
    };
    let facilities = [
        (market.access_to_storage, 20.0),
        (market.access_to_processing, 15.0),
        (market.cooperative_membership, 20.0),
    ]
    .iter()
    .filter(|(present, _)| *present)
    .map(|(_, points)| points)
    .sum::<f64>();
    (distance + transport + facilities).min(100.0)
}

/// Lowest distance and transport tiers, no facilities
fn market_score_unknown() -> f64 {
    10.0
}

enum MissingData {
    Soil,
    Insurance,
    Market,
}

fn missing_data_warning(language: Language, missing: MissingData) -> String {
    let text = match (missing, language) {
        (MissingData::Soil, Language::French) => {
            "Données de sol absentes : score neutre appliqué."
        }
        (MissingData::Soil, Language::English) => "No soil data: neutral score applied.",
        (MissingData::Insurance, Language::French) => {
            "Aucun historique d'assurance : historique vide supposé."
        }
        (MissingData::Insurance, Language::English) => {
            "No insurance history: an empty history was assumed."
        }
        (MissingData::Market, Language::French) => {
            "Accès au marché inconnu : conditions les moins favorables supposées."
        }
        (MissingData::Market, Language::English) => {
            "Unknown market access: least favourable conditions assumed."
        }
    };
    text.to_string()
}

fn recommendation(
    language: Language,
    risk_level: CreditRiskLevel,
    suitability: SoilSuitability,
    payment_reliability: f64,
    eligible_amount: Decimal,
    repayment_period: u32,
    interest_rate: Decimal,
) -> String {
    let soil = suitability.label(language);
    match language {
        Language::French => {
            let verdict = match risk_level {
                CreditRiskLevel::Low => "Profil solide, crédit recommandé",
                CreditRiskLevel::Medium => "Profil correct, crédit possible avec suivi",
                CreditRiskLevel::High => {
                    "Profil fragile, crédit limité accompagné d'un encadrement technique"
                }
            };
            format!(
                "{} : qualité de sol {}, fiabilité de paiement {:.0} %. Montant éligible {} FCFA sur {} mois au taux de {} %.",
                verdict, soil, payment_reliability, eligible_amount, repayment_period, interest_rate
            )
        }
        Language::English => {
            let verdict = match risk_level {
                CreditRiskLevel::Low => "Strong profile, credit recommended",
                CreditRiskLevel::Medium => "Fair profile, credit possible with follow-up",
                CreditRiskLevel::High => "Fragile profile, limited credit with technical support",
            };
            format!(
                "{}: {} soil quality, {:.0}% payment reliability. Eligible for {} FCFA over {} months at {}%.",
                verdict, soil, payment_reliability, eligible_amount, repayment_period, interest_rate
            )
        }
    }
}
