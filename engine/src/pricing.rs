//! Parametric micro-insurance premium pricing
//!
//! The monthly premium is always clamped to the affordability band
//! (200-1000 FCFA by default), whatever the computed risk.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::{CropProfile, EngineConfig, PricingSettings};
use crate::error::{ensure_positive, EngineError, EngineResult};
use crate::models::{PremiumBreakdown, PremiumInput, PremiumResult, PremiumRiskCategory};
use crate::types::{Crop, Language, Region};

/// Combined risk below which a quote is reported as low
const LOW_COMBINED_RISK: Decimal = Decimal::from_parts(3, 0, 0, false, 1);
/// Combined risk below which a quote is reported as medium
const MEDIUM_COMBINED_RISK: Decimal = Decimal::from_parts(6, 0, 0, false, 1);

#[derive(Debug, Clone)]
pub struct PremiumPricer {
    settings: PricingSettings,
    crops: BTreeMap<Crop, CropProfile>,
}

impl PremiumPricer {
    pub fn new(settings: PricingSettings, crops: BTreeMap<Crop, CropProfile>) -> Self {
        Self { settings, crops }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.pricing.clone(), config.crops.clone())
    }

    /// Quote a monthly premium
    pub fn quote(&self, input: &PremiumInput) -> EngineResult<PremiumResult> {
        ensure_positive("farm_size", input.farm_size)?;

        let farm_size = to_decimal("farm_size", input.farm_size)?;
        let risk = to_decimal("risk_index", input.risk_index.value())?;
        let crop = Crop::parse(&input.crop_type);
        let crop_risk_factor = self.crop_risk_factor(crop, &input.crop_type);
        let regional_risk_factor = self.regional_risk_factor(input.region.as_deref());

        let base_premium = checked_product(&[self.settings.base_rate_per_hectare, farm_size])?;
        let raw = checked_product(&[
            base_premium,
            crop_risk_factor,
            regional_risk_factor,
            Decimal::ONE + risk,
        ])?;
        let adjusted_premium = round_up_to_step(raw, self.settings.rounding_step)?;
        let monthly_premium = adjusted_premium
            .clamp(self.settings.minimum_premium, self.settings.maximum_premium)
            .normalize();
        let coverage_amount =
            checked_product(&[monthly_premium, self.settings.coverage_multiplier])?.normalize();

        let combined_risk = checked_product(&[risk, crop_risk_factor, regional_risk_factor])?;
        let risk_category = if combined_risk < LOW_COMBINED_RISK {
            PremiumRiskCategory::Low
        } else if combined_risk < MEDIUM_COMBINED_RISK {
            PremiumRiskCategory::Medium
        } else {
            PremiumRiskCategory::High
        };

        let crop_name = match crop {
            Some(crop) => crop.display_name(input.language).to_string(),
            None => input.crop_type.trim().to_string(),
        };
        let explanation = explain(
            input.language,
            &crop_name,
            input.farm_size,
            risk_category,
            monthly_premium,
            coverage_amount,
        );

        debug!(
            crop_type = %input.crop_type,
            %adjusted_premium,
            %monthly_premium,
            ?risk_category,
            language = input.language.code(),
            "Quoted premium"
        );

        Ok(PremiumResult {
            monthly_premium,
            coverage_amount,
            risk_category,
            explanation,
            breakdown: PremiumBreakdown {
                base_premium: base_premium.normalize(),
                crop_risk_factor,
                regional_risk_factor,
                adjusted_premium: adjusted_premium.normalize(),
            },
        })
    }

    fn crop_risk_factor(&self, crop: Option<Crop>, crop_type: &str) -> Decimal {
        match crop.and_then(|c| self.crops.get(&c)) {
            Some(profile) => profile.risk_factor,
            None => {
                warn!(crop_type, "Unknown crop, using default crop risk factor");
                self.settings.unknown_crop_risk_factor
            }
        }
    }

    fn regional_risk_factor(&self, region: Option<&str>) -> Decimal {
        let Some(name) = region else {
            return self.settings.default_regional_factor;
        };
        match Region::parse(name).and_then(|r| self.settings.regional_factors.get(&r)) {
            Some(factor) => *factor,
            None => {
                warn!(region = name, "Unknown region, using default regional factor");
                self.settings.default_regional_factor
            }
        }
    }
}

fn to_decimal(field: &str, value: f64) -> EngineResult<Decimal> {
    Decimal::try_from(value)
        .map_err(|e| EngineError::invalid(field, format!("cannot be represented: {}", e)))
}

/// Product of FCFA amounts and factors, rejecting farms too large to price
pub(crate) fn checked_product(factors: &[Decimal]) -> EngineResult<Decimal> {
    factors
        .iter()
        .try_fold(Decimal::ONE, |acc, factor| acc.checked_mul(*factor))
        .ok_or_else(|| EngineError::invalid("farm_size", "too large"))
}

fn round_up_to_step(value: Decimal, step: Decimal) -> EngineResult<Decimal> {
    value
        .checked_div(step)
        .and_then(|steps| steps.ceil().checked_mul(step))
        .ok_or_else(|| EngineError::invalid("farm_size", "too large"))
}

fn explain(
    language: Language,
    crop_name: &str,
    farm_size: f64,
    category: PremiumRiskCategory,
    premium: Decimal,
    coverage: Decimal,
) -> String {
    match language {
        Language::French => format!(
            "Pour votre exploitation de {} de {} ha, le risque est {}. Prime mensuelle : {} FCFA pour une couverture de {} FCFA.",
            crop_name,
            farm_size,
            category.label(language),
            premium,
            coverage
        ),
        Language::English => format!(
            "For your {} ha {} farm, the risk is {}. Monthly premium: {} FCFA for {} FCFA of coverage.",
            farm_size,
            crop_name,
            category.label(language),
            premium,
            coverage
        ),
    }
}
