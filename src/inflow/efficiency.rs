//! 효율 계수(ef, ef2) 조합을 하나의 보정 영역으로 분류한다.
//! J, AOF, Qo 계산이 모두 이 분류기를 통해 같은 판정을 공유한다.

use tracing::{debug, warn};

use super::well_test::InflowError;

/// 보정 방식 (효율 계수의 존재 여부만으로 결정).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Correction {
    /// ef = 1, ef2 없음
    None,
    /// ef ≠ 1, ef2 없음
    Single,
    /// ef ≠ 1, ef2 있음
    Dual,
}

/// 효율 계수 조합의 세부 영역.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EfficiencyRegime {
    /// 손상/자극 없음 (ef = 1)
    None,
    /// 손상 (ef < 1)
    Damaged,
    /// 자극 (ef > 1)
    Stimulated,
    /// 손상 후 자극 (ef < 1, ef2 ≥ 1)
    DamagedThenStimulated,
    /// 자극 후 재손상 (ef > 1, ef2 ≤ 1)
    StimulatedThenDamaged,
    /// 같은 방향으로 두 번 보정 (ef < 1, ef2 < 1 또는 ef > 1, ef2 > 1).
    /// J와 Qo는 계산되지만 AOF 상관식은 없다.
    Stacked,
}

impl EfficiencyRegime {
    /// (ef, ef2) 를 분류한다. ef = 1 과 ef2 가 함께 주어지면 거부한다.
    pub fn classify(ef: f64, ef2: Option<f64>) -> Result<Self, InflowError> {
        let invalid = InflowError::InvalidCombination { ef, ef2 };
        if !ef.is_finite() || ef2.is_some_and(|v| !v.is_finite()) {
            warn!(ef, ?ef2, "non-finite efficiency factor");
            return Err(invalid);
        }
        let regime = match ef2 {
            None if ef == 1.0 => EfficiencyRegime::None,
            None if ef < 1.0 => EfficiencyRegime::Damaged,
            None => EfficiencyRegime::Stimulated,
            Some(_) if ef == 1.0 => {
                warn!(ef, ?ef2, "ef2 supplied without a primary efficiency correction");
                return Err(invalid);
            }
            Some(e2) if ef < 1.0 && e2 >= 1.0 => EfficiencyRegime::DamagedThenStimulated,
            Some(e2) if ef > 1.0 && e2 <= 1.0 => EfficiencyRegime::StimulatedThenDamaged,
            Some(_) => EfficiencyRegime::Stacked,
        };
        debug!(ef, ?ef2, ?regime, "efficiency regime classified");
        Ok(regime)
    }

    pub fn correction(&self) -> Correction {
        match self {
            EfficiencyRegime::None => Correction::None,
            EfficiencyRegime::Damaged | EfficiencyRegime::Stimulated => Correction::Single,
            EfficiencyRegime::DamagedThenStimulated
            | EfficiencyRegime::StimulatedThenDamaged
            | EfficiencyRegime::Stacked => Correction::Dual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_each_documented_regime() {
        let cases = [
            (1.0, None, EfficiencyRegime::None),
            (0.7, None, EfficiencyRegime::Damaged),
            (1.3, None, EfficiencyRegime::Stimulated),
            (0.7, Some(1.0), EfficiencyRegime::DamagedThenStimulated),
            (0.7, Some(1.4), EfficiencyRegime::DamagedThenStimulated),
            (1.3, Some(1.0), EfficiencyRegime::StimulatedThenDamaged),
            (1.3, Some(0.6), EfficiencyRegime::StimulatedThenDamaged),
            (0.7, Some(0.8), EfficiencyRegime::Stacked),
            (1.3, Some(1.2), EfficiencyRegime::Stacked),
        ];
        for (ef, ef2, expected) in cases {
            assert_eq!(
                EfficiencyRegime::classify(ef, ef2),
                Ok(expected),
                "ef={ef} ef2={ef2:?}"
            );
        }
    }

    #[test]
    fn ef2_without_primary_correction_is_rejected() {
        let err = EfficiencyRegime::classify(1.0, Some(1.2)).unwrap_err();
        assert!(matches!(err, InflowError::InvalidCombination { .. }));
    }

    #[test]
    fn nan_factor_is_rejected() {
        assert!(EfficiencyRegime::classify(f64::NAN, None).is_err());
        assert!(EfficiencyRegime::classify(0.8, Some(f64::NAN)).is_err());
    }

    #[test]
    fn correction_follows_presence_of_factors() {
        assert_eq!(EfficiencyRegime::None.correction(), Correction::None);
        assert_eq!(EfficiencyRegime::Damaged.correction(), Correction::Single);
        assert_eq!(EfficiencyRegime::Stimulated.correction(), Correction::Single);
        assert_eq!(EfficiencyRegime::Stacked.correction(), Correction::Dual);
    }
}
