//! Crop risk model
//!
//! Deterministic, rule-based scoring of six weather-driven hazards for one
//! field evaluation. Every hazard score is a documented weighted blend of
//! the crop's base sensitivity, its stage-adjusted sensitivity, and a
//! weather-derived severity term, clamped to [0, 10]. No learned
//! parameters: every constant below is reviewable arithmetic.

use chrono::Utc;
use tracing::debug;

use crate::error::{MonitorError, Result};
use crate::risk::profiles::{profile, CropSensitivityProfile};
use crate::risk::recommendations;
use crate::types::thresholds::risk as thresholds;
use crate::types::{
    critical_event_count, AlertLevel, CropType, ForecastDay, GrowthStage, Hazard, HazardScores,
    IrrigationType, RiskAssessment, SoilType, WeatherObservation,
};

/// Everything one evaluation needs
#[derive(Debug, Clone)]
pub struct RiskInput<'a> {
    pub field_id: &'a str,
    pub crop: CropType,
    pub stage: GrowthStage,
    pub soil: SoilType,
    pub irrigation: IrrigationType,
    pub weather: WeatherObservation,
    pub forecast: &'a [ForecastDay],
}

/// Run the full six-hazard assessment for one field.
///
/// # Scoring
///
/// Overall = Σ hazard × weight (waterlogging/drought 0.20 each, the rest
/// 0.15) plus 0.5 per critical-severity forecast day, clamped to [0, 10].
/// Confidence derives from the variance across the six hazard scores:
/// agreeing hazards ⇒ high confidence, floor 0.5.
///
/// # Errors
///
/// `Computation` when a weather input is non-finite - a NaN temperature
/// would silently zero half the hazards.
pub fn assess(input: &RiskInput<'_>) -> Result<RiskAssessment> {
    validate_weather(&input.weather)?;

    let p = profile(input.crop);
    let w = &input.weather;

    let hazards = HazardScores {
        waterlogging: score_waterlogging(p, input.stage, input.soil, w.rainfall_mm),
        drought: score_drought(p, input.stage, input.irrigation, w.rainfall_mm, w.temperature_c),
        heat: score_heat(p, input.stage, w.temperature_c, w.humidity_pct),
        cold: score_cold(p, input.stage, w.temperature_c),
        disease: score_disease(p, w.humidity_pct, w.rainfall_mm, w.temperature_c),
        wind: score_wind(p, input.stage, w.wind_speed_kmh),
    };

    let critical_events = critical_event_count(input.forecast);
    let overall = (hazards.weighted_sum()
        + critical_events as f64 * thresholds::FORECAST_CRITICAL_BONUS)
        .clamp(0.0, 10.0);

    let confidence = confidence_from_variance(hazards.variance());
    let alert_level = AlertLevel::from_score(overall);
    let recommendations = recommendations::for_scores(&hazards);

    debug!(
        field = input.field_id,
        crop = %input.crop,
        stage = %input.stage,
        overall = %format!("{overall:.2}"),
        alert = %alert_level,
        critical_events,
        "risk assessment complete"
    );

    Ok(RiskAssessment {
        field_id: input.field_id.to_string(),
        crop: input.crop,
        stage: input.stage,
        hazards,
        overall_score: overall,
        confidence,
        alert_level,
        forecast_critical_events: critical_events,
        recommendations,
        evaluated_at: Utc::now(),
    })
}

fn validate_weather(w: &WeatherObservation) -> Result<()> {
    let fields = [
        ("temperature", w.temperature_c),
        ("rainfall", w.rainfall_mm),
        ("humidity", w.humidity_pct),
        ("wind_speed", w.wind_speed_kmh),
    ];
    for (name, value) in fields {
        if !value.is_finite() {
            return Err(MonitorError::Computation(format!(
                "non-finite weather input: {name}"
            )));
        }
    }
    Ok(())
}

/// Waterlogging: `(base*0.4 + stage*0.3 + rainfall_severity*0.3) * drainage`.
///
/// Rainfall severity is 1 point per 10 mm above the crop's optimal daily
/// maximum, capped at 10. Drainage factor 0.3 (sandy) to 0.9 (clay).
fn score_waterlogging(
    p: &CropSensitivityProfile,
    stage: GrowthStage,
    soil: SoilType,
    rainfall_mm: f64,
) -> f64 {
    let severity = ((rainfall_mm - p.optimal_rainfall_mm.1) / 10.0).clamp(0.0, 10.0);
    let blend = p.base.waterlogging * 0.4
        + p.stage_sensitivity(Hazard::Waterlogging, stage) * 0.3
        + severity * 0.3;
    (blend * soil.drainage_factor()).clamp(0.0, 10.0)
}

/// Drought: `(base*0.35 + stage*0.25 + deficit_severity*0.4) * irrigation *
/// heat_amplifier`.
///
/// Deficit severity is 2 points per mm under the optimal daily minimum,
/// capped at 10. Irrigation mitigation 0.2 (drip) to 1.0 (rainfed). Heat
/// amplifier 1.2 when temperature exceeds the optimal maximum: evaporative
/// demand compounds the deficit.
fn score_drought(
    p: &CropSensitivityProfile,
    stage: GrowthStage,
    irrigation: IrrigationType,
    rainfall_mm: f64,
    temperature_c: f64,
) -> f64 {
    let severity = ((p.optimal_rainfall_mm.0 - rainfall_mm) * 2.0).clamp(0.0, 10.0);
    let heat_amplifier = if temperature_c > p.optimal_temp_c.1 {
        1.2
    } else {
        1.0
    };
    let blend = p.base.drought * 0.35
        + p.stage_sensitivity(Hazard::Drought, stage) * 0.25
        + severity * 0.4;
    (blend * irrigation.drought_mitigation() * heat_amplifier).clamp(0.0, 10.0)
}

/// Heat stress: temperature excess over the optimal maximum drives the
/// severity term (1.2 per °C, capped), amplified 1.15x above 70 % RH -
/// humid heat blocks transpirative cooling. No excess, no score.
fn score_heat(
    p: &CropSensitivityProfile,
    stage: GrowthStage,
    temperature_c: f64,
    humidity_pct: f64,
) -> f64 {
    let excess = temperature_c - p.optimal_temp_c.1;
    if excess <= 0.0 {
        return 0.0;
    }
    let severity = (excess * 1.2).min(10.0);
    let humidity_multiplier = if humidity_pct > 70.0 { 1.15 } else { 1.0 };
    let blend =
        p.base.heat * 0.3 + p.stage_sensitivity(Hazard::Heat, stage) * 0.2 + severity * 0.5;
    (blend * humidity_multiplier).clamp(0.0, 10.0)
}

/// Cold stress: temperature deficit under the optimal minimum drives the
/// severity term (1.2 per °C, capped). Below 5 °C is frost: severity forced
/// to maximum regardless of the deficit.
fn score_cold(p: &CropSensitivityProfile, stage: GrowthStage, temperature_c: f64) -> f64 {
    let deficit = p.optimal_temp_c.0 - temperature_c;
    let severity = if temperature_c < thresholds::FROST_TEMP_C {
        10.0
    } else if deficit > 0.0 {
        (deficit * 1.2).min(10.0)
    } else {
        return 0.0;
    };
    let blend =
        p.base.cold * 0.3 + p.stage_sensitivity(Hazard::Cold, stage) * 0.2 + severity * 0.5;
    blend.clamp(0.0, 10.0)
}

/// Disease risk: humidity-driven severity (ramping 0→10 across 40-95 % RH)
/// amplified by leaf wetness (rainfall > 10 mm: 1.25x) and a mid-range
/// temperature multiplier - fungal pathogens peak inside 18-30 °C, not at
/// the extremes (1.3x inside the band, 0.8x more than 5 °C outside it).
fn score_disease(
    p: &CropSensitivityProfile,
    humidity_pct: f64,
    rainfall_mm: f64,
    temperature_c: f64,
) -> f64 {
    let humidity_severity = ((humidity_pct - 40.0) / 55.0 * 10.0).clamp(0.0, 10.0);
    let rain_amplifier = if rainfall_mm > 10.0 { 1.25 } else { 1.0 };
    let band_multiplier = if (18.0..=30.0).contains(&temperature_c) {
        1.3
    } else if temperature_c < 13.0 || temperature_c > 35.0 {
        0.8
    } else {
        1.0
    };
    let blend = p.base.disease * 0.35 + humidity_severity * 0.65;
    (blend * rain_amplifier * band_multiplier).clamp(0.0, 10.0)
}

/// Wind damage: breakpoint severity on wind speed, amplified 1.3x during
/// flowering/maturity when the canopy carries structural load. Calm wind,
/// no score.
fn score_wind(p: &CropSensitivityProfile, stage: GrowthStage, wind_speed_kmh: f64) -> f64 {
    let severity = if wind_speed_kmh >= 90.0 {
        10.0
    } else if wind_speed_kmh >= 70.0 {
        8.0
    } else if wind_speed_kmh >= 50.0 {
        6.0
    } else if wind_speed_kmh >= 30.0 {
        4.0
    } else if wind_speed_kmh >= 15.0 {
        2.0
    } else {
        return 0.0;
    };
    let structural = if stage.is_structurally_vulnerable() {
        1.3
    } else {
        1.0
    };
    let blend =
        p.base.wind * 0.3 + p.stage_sensitivity(Hazard::Wind, stage) * 0.2 + severity * 0.5;
    (blend * structural).clamp(0.0, 10.0)
}

/// Confidence from inter-hazard variance: `1 - variance/25`, floored at 0.5.
///
/// Variance 0 (all hazards agree) gives 1.0; the floor keeps a disagreeing
/// evaluation usable but visibly less trustworthy.
fn confidence_from_variance(variance: f64) -> f64 {
    (1.0 - variance / 25.0).clamp(thresholds::CONFIDENCE_FLOOR, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn weather(temp: f64, rain: f64, humidity: f64, wind: f64) -> WeatherObservation {
        WeatherObservation {
            temperature_c: temp,
            rainfall_mm: rain,
            humidity_pct: humidity,
            wind_speed_kmh: wind,
        }
    }

    fn forecast_day(rain: f64) -> ForecastDay {
        ForecastDay {
            date: NaiveDate::from_ymd_opt(2025, 7, 15).unwrap(),
            temperature_c: 30.0,
            rainfall_mm: rain,
            humidity_pct: 70.0,
            wind_speed_kmh: 12.0,
        }
    }

    fn input<'a>(
        weather: &'a WeatherObservation,
        forecast: &'a [ForecastDay],
        crop: CropType,
        stage: GrowthStage,
        soil: SoilType,
        irrigation: IrrigationType,
    ) -> RiskInput<'a> {
        RiskInput {
            field_id: "field-1",
            crop,
            stage,
            soil,
            irrigation,
            weather: *weather,
            forecast,
        }
    }

    #[test]
    fn wheat_monsoon_waterlogging_scenario() {
        // Wheat, flowering, 120 mm rainfall, 32 °C, clay, rainfed, with a
        // 3-day run of critical rainfall in the forecast.
        let w = weather(32.0, 120.0, 70.0, 10.0);
        let forecast = vec![forecast_day(110.0), forecast_day(130.0), forecast_day(105.0)];
        let assessment = assess(&input(
            &w,
            &forecast,
            CropType::Wheat,
            GrowthStage::Flowering,
            SoilType::Clay,
            IrrigationType::Rainfed,
        ))
        .unwrap();

        assert!(
            assessment.hazards.waterlogging >= 8.0,
            "waterlogging: {}",
            assessment.hazards.waterlogging
        );
        assert!(
            matches!(assessment.alert_level, AlertLevel::High | AlertLevel::Critical),
            "alert level: {}",
            assessment.alert_level
        );
        assert_eq!(assessment.forecast_critical_events, 3);
        assert!(
            assessment.overall_score >= crate::types::thresholds::scheduler::ALERT_THRESHOLD,
            "overall: {}",
            assessment.overall_score
        );
        // Waterlogging is urgent enough to lead the recommendation list
        assert_eq!(assessment.recommendations[0].hazard, Hazard::Waterlogging);
    }

    #[test]
    fn all_hazards_clamped_under_extreme_inputs() {
        let w = weather(55.0, 500.0, 100.0, 200.0);
        let assessment = assess(&input(
            &w,
            &[],
            CropType::Rice,
            GrowthStage::Flowering,
            SoilType::Clay,
            IrrigationType::Rainfed,
        ))
        .unwrap();
        for (hazard, score) in assessment.hazards.iter() {
            assert!(
                (0.0..=10.0).contains(&score),
                "{hazard} score {score} out of range"
            );
        }
        assert!(assessment.overall_score <= 10.0);
    }

    #[test]
    fn frost_forces_maximum_cold_severity() {
        let mild = assess(&input(
            &weather(8.0, 5.0, 50.0, 5.0),
            &[],
            CropType::Wheat,
            GrowthStage::Vegetative,
            SoilType::Loam,
            IrrigationType::Canal,
        ))
        .unwrap();
        let frost = assess(&input(
            &weather(3.0, 5.0, 50.0, 5.0),
            &[],
            CropType::Wheat,
            GrowthStage::Vegetative,
            SoilType::Loam,
            IrrigationType::Canal,
        ))
        .unwrap();
        assert!(frost.hazards.cold > mild.hazards.cold);
        // Frost severity is pinned at 10 → cold = base*0.3 + stage*0.2 + 5.0
        let p = profile(CropType::Wheat);
        let expected = p.base.cold * 0.3
            + p.stage_sensitivity(Hazard::Cold, GrowthStage::Vegetative) * 0.2
            + 5.0;
        assert!((frost.hazards.cold - expected).abs() < 1e-9);
    }

    #[test]
    fn benign_weather_scores_low_everywhere() {
        let w = weather(22.0, 5.0, 50.0, 8.0);
        let assessment = assess(&input(
            &w,
            &[],
            CropType::Wheat,
            GrowthStage::Vegetative,
            SoilType::Loam,
            IrrigationType::Drip,
        ))
        .unwrap();
        assert_eq!(assessment.hazards.heat, 0.0);
        assert_eq!(assessment.hazards.cold, 0.0);
        assert_eq!(assessment.hazards.wind, 0.0);
        assert_eq!(assessment.alert_level, AlertLevel::Normal);
        assert!(assessment.recommendations.is_empty());
    }

    #[test]
    fn overall_monotonic_in_rainfall_driven_hazard() {
        // Rising rainfall can only raise (or hold) the overall score:
        // waterlogging and disease rise, drought falls to its floor first.
        let mut last = 0.0;
        for rain in [0.0, 20.0, 60.0, 120.0, 200.0] {
            let w = weather(30.0, rain, 75.0, 10.0);
            let a = assess(&input(
                &w,
                &[],
                CropType::Maize,
                GrowthStage::Flowering,
                SoilType::Clay,
                IrrigationType::Drip,
            ))
            .unwrap();
            assert!(
                a.overall_score >= last - 1e-9,
                "overall dropped from {last} at rainfall {rain}"
            );
            last = a.overall_score;
        }
    }

    #[test]
    fn drip_irrigation_mitigates_drought() {
        let w = weather(35.0, 0.0, 30.0, 5.0);
        let rainfed = assess(&input(
            &w,
            &[],
            CropType::Maize,
            GrowthStage::Vegetative,
            SoilType::Sandy,
            IrrigationType::Rainfed,
        ))
        .unwrap();
        let drip = assess(&input(
            &w,
            &[],
            CropType::Maize,
            GrowthStage::Vegetative,
            SoilType::Sandy,
            IrrigationType::Drip,
        ))
        .unwrap();
        assert!(drip.hazards.drought < rainfed.hazards.drought);
        assert!((drip.hazards.drought - rainfed.hazards.drought * 0.2).abs() < 1e-9);
    }

    #[test]
    fn confidence_floor_and_agreement() {
        assert_eq!(confidence_from_variance(0.0), 1.0);
        assert_eq!(confidence_from_variance(25.0), 0.5);
        assert_eq!(confidence_from_variance(100.0), 0.5);
        assert!((confidence_from_variance(5.0) - 0.8).abs() < 1e-9);
    }

    #[test]
    fn forecast_critical_events_raise_overall() {
        let w = weather(30.0, 60.0, 70.0, 10.0);
        let quiet = assess(&input(
            &w,
            &[],
            CropType::Soybean,
            GrowthStage::Flowering,
            SoilType::Clay,
            IrrigationType::Rainfed,
        ))
        .unwrap();
        let forecast = vec![forecast_day(150.0), forecast_day(120.0)];
        let stormy = assess(&input(
            &w,
            &forecast,
            CropType::Soybean,
            GrowthStage::Flowering,
            SoilType::Clay,
            IrrigationType::Rainfed,
        ))
        .unwrap();
        assert!((stormy.overall_score - (quiet.overall_score + 1.0)).abs() < 1e-9);
    }

    #[test]
    fn nan_weather_is_rejected() {
        let w = weather(f64::NAN, 5.0, 50.0, 5.0);
        let err = assess(&input(
            &w,
            &[],
            CropType::Wheat,
            GrowthStage::Vegetative,
            SoilType::Loam,
            IrrigationType::Canal,
        ))
        .unwrap_err();
        assert!(matches!(err, MonitorError::Computation(_)));
    }
}
