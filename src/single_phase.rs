use serde::{Deserialize, Serialize};

/// 유전 단위 환산 상수 (bbl/d, mD, ft, cp, psi).
const DARCY_UNIT_CONSTANT: f64 = 141.2;

/// 방사류 유동 영역.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowRegime {
    /// 의정상(pseudo-steady) 상태: ln(re/rw) - 0.75 + s
    PseudoSteady,
    /// 정상(steady) 상태: ln(re/rw) + s
    Steady,
}

impl FlowRegime {
    pub fn label(&self) -> &'static str {
        match self {
            FlowRegime::PseudoSteady => "pseudo-steady",
            FlowRegime::Steady => "steady",
        }
    }
}

/// 단상 Darcy 방사류 입력값.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadialFlowInput {
    /// 유효 유체투과율 [mD]
    pub ko_md: f64,
    /// 저류층 두께 [ft]
    pub h_ft: f64,
    /// 원유 용적계수 [bbl/stb]
    pub bo: f64,
    /// 원유 점도 [cp]
    pub uo_cp: f64,
    /// 배수 반경 [ft]
    pub re_ft: f64,
    /// 공벽 반경 [ft]
    pub rw_ft: f64,
    /// 스킨 계수
    pub skin: f64,
    pub regime: FlowRegime,
}

impl RadialFlowInput {
    /// 유동 영역에 따른 로그 항. re ≤ rw 는 검사하지 않는다.
    fn log_term(&self) -> f64 {
        let ln = (self.re_ft / self.rw_ft).ln();
        match self.regime {
            FlowRegime::PseudoSteady => ln - 0.75 + self.skin,
            FlowRegime::Steady => ln + self.skin,
        }
    }
}

/// 단상 생산성 지수 `J = ko*h / (141.2*bo*uo*(log term))` [bbl/d/psi].
pub fn single_phase_j(input: &RadialFlowInput) -> f64 {
    input.ko_md * input.h_ft / (DARCY_UNIT_CONSTANT * input.bo * input.uo_cp * input.log_term())
}

/// 단상 유량 `Q = ko*h*(pr - pwf) / (141.2*bo*(log term))` [bbl/d].
///
/// 분모에 점도가 들어가지 않는 형태를 그대로 따른다.
pub fn single_phase_q(input: &RadialFlowInput, pr_psia: f64, pwf_psia: f64) -> f64 {
    (input.ko_md * input.h_ft * (pr_psia - pwf_psia))
        / (DARCY_UNIT_CONSTANT * input.bo * input.log_term())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn input(regime: FlowRegime) -> RadialFlowInput {
        RadialFlowInput {
            ko_md: 50.0,
            h_ft: 30.0,
            bo: 1.2,
            uo_cp: 1.5,
            re_ft: 1000.0,
            rw_ft: 0.5,
            skin: 2.0,
            regime,
        }
    }

    #[test]
    fn pseudo_steady_j_matches_hand_calculation() {
        let ln = (2000.0f64).ln();
        let expected = 1500.0 / (141.2 * 1.2 * 1.5 * (ln - 0.75 + 2.0));
        assert_relative_eq!(
            single_phase_j(&input(FlowRegime::PseudoSteady)),
            expected,
            max_relative = 1e-12
        );
    }

    #[test]
    fn regimes_differ_only_by_shape_factor() {
        let pss = single_phase_j(&input(FlowRegime::PseudoSteady));
        let ss = single_phase_j(&input(FlowRegime::Steady));
        let k = 1500.0 / (141.2 * 1.2 * 1.5);
        assert_relative_eq!(k / pss - k / ss, -0.75, max_relative = 1e-9);
        assert!(pss > ss);
    }

    #[test]
    fn rate_scales_with_drawdown() {
        let inp = input(FlowRegime::Steady);
        let q1 = single_phase_q(&inp, 3000.0, 2000.0);
        let q2 = single_phase_q(&inp, 3000.0, 1000.0);
        assert_relative_eq!(q2, 2.0 * q1, max_relative = 1e-12);
        assert_eq!(single_phase_q(&inp, 3000.0, 3000.0), 0.0);
    }

    #[test]
    fn equal_radii_is_not_trapped() {
        let mut inp = input(FlowRegime::Steady);
        inp.rw_ft = inp.re_ft;
        inp.skin = 0.0;
        assert!(single_phase_j(&inp).is_infinite());
    }
}
