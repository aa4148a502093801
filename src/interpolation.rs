//! 형상 보존(monotone) 3차 Hermite 보간.
//!
//! Fritsch–Carlson 방식으로 절점 기울기를 정하므로 단조 구간에서 오버슈트가 생기지 않는다.
//! IPR 곡선처럼 유량이 늘수록 압력이 줄어드는 자료를 매끄럽게 재표본할 때 사용한다.

use thiserror::Error;

/// 보간기 구성 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterpolationError {
    #[error("x and y must have the same length ({x} != {y})")]
    LengthMismatch { x: usize, y: usize },
    #[error("at least {required} points are required, got {got}")]
    TooFewPoints { required: usize, got: usize },
    #[error("x values must be strictly increasing (index {index})")]
    NotStrictlyIncreasing { index: usize },
}

/// 단조 3차 보간기.
#[derive(Debug, Clone)]
pub struct MonotoneCubic {
    xs: Vec<f64>,
    ys: Vec<f64>,
    slopes: Vec<f64>,
}

impl MonotoneCubic {
    /// 절점 (x, y) 로 보간기를 만든다. x 는 엄격히 증가해야 하며 최소 2점이 필요하다.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self, InterpolationError> {
        if xs.len() != ys.len() {
            return Err(InterpolationError::LengthMismatch {
                x: xs.len(),
                y: ys.len(),
            });
        }
        if xs.len() < 2 {
            return Err(InterpolationError::TooFewPoints {
                required: 2,
                got: xs.len(),
            });
        }
        if let Some(pos) = xs.windows(2).position(|w| !(w[1] > w[0])) {
            return Err(InterpolationError::NotStrictlyIncreasing { index: pos + 1 });
        }
        let slopes = fritsch_carlson_slopes(&xs, &ys);
        Ok(Self { xs, ys, slopes })
    }

    pub fn x_min(&self) -> f64 {
        self.xs[0]
    }

    pub fn x_max(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }

    /// x 에서 보간값. 범위 밖은 양 끝 구간의 다항식을 그대로 연장한다.
    pub fn eval(&self, x: f64) -> f64 {
        let n = self.xs.len();
        // x 를 포함하는 구간 [k, k+1]
        let k = self
            .xs
            .partition_point(|&xi| xi <= x)
            .saturating_sub(1)
            .min(n - 2);
        let h = self.xs[k + 1] - self.xs[k];
        let t = (x - self.xs[k]) / h;
        let t2 = t * t;
        let t3 = t2 * t;
        let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
        let h10 = t3 - 2.0 * t2 + t;
        let h01 = -2.0 * t3 + 3.0 * t2;
        let h11 = t3 - t2;
        h00 * self.ys[k]
            + h10 * h * self.slopes[k]
            + h01 * self.ys[k + 1]
            + h11 * h * self.slopes[k + 1]
    }
}

/// 양 끝을 포함해 n 개의 등간격 값을 만든다.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

fn fritsch_carlson_slopes(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len();
    let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
    let delta: Vec<f64> = ys
        .windows(2)
        .zip(&h)
        .map(|(w, hk)| (w[1] - w[0]) / hk)
        .collect();

    if n == 2 {
        return vec![delta[0], delta[0]];
    }

    let mut m = vec![0.0; n];
    for k in 1..n - 1 {
        let (d0, d1) = (delta[k - 1], delta[k]);
        if d0 * d1 <= 0.0 {
            continue;
        }
        // 가중 조화평균
        let w1 = 2.0 * h[k] + h[k - 1];
        let w2 = h[k] + 2.0 * h[k - 1];
        m[k] = (w1 + w2) / (w1 / d0 + w2 / d1);
    }
    m[0] = end_slope(h[0], h[1], delta[0], delta[1]);
    m[n - 1] = end_slope(h[n - 2], h[n - 3], delta[n - 2], delta[n - 3]);
    m
}

/// 3점 비중심 차분으로 끝점 기울기를 구하고 단조성이 깨지지 않도록 제한한다.
fn end_slope(h0: f64, h1: f64, d0: f64, d1: f64) -> f64 {
    let m = ((2.0 * h0 + h1) * d0 - h0 * d1) / (h0 + h1);
    if m.signum() != d0.signum() {
        0.0
    } else if d0.signum() != d1.signum() && m.abs() > 3.0 * d0.abs() {
        3.0 * d0
    } else {
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn passes_through_knots() {
        let xs = vec![0.0, 1.0, 3.0, 4.0];
        let ys = vec![10.0, 8.0, 3.0, 0.0];
        let spline = MonotoneCubic::new(xs.clone(), ys.clone()).unwrap();
        for (x, y) in xs.iter().zip(&ys) {
            assert_abs_diff_eq!(spline.eval(*x), *y, epsilon = 1e-12);
        }
    }

    #[test]
    fn stays_monotone_between_knots() {
        let xs = vec![0.0, 100.0, 110.0, 400.0, 420.0];
        let ys = vec![4000.0, 3000.0, 2990.0, 500.0, 0.0];
        let spline = MonotoneCubic::new(xs, ys).unwrap();
        let samples = linspace(0.0, 420.0, 500);
        let values: Vec<f64> = samples.iter().map(|&x| spline.eval(x)).collect();
        for w in values.windows(2) {
            assert!(w[1] <= w[0] + 1e-9, "{} then {}", w[0], w[1]);
        }
    }

    #[test]
    fn two_points_are_linear() {
        let spline = MonotoneCubic::new(vec![0.0, 2.0], vec![10.0, 0.0]).unwrap();
        assert_abs_diff_eq!(spline.eval(1.0), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn rejects_repeated_x() {
        let err = MonotoneCubic::new(vec![0.0, 1.0, 1.0], vec![3.0, 2.0, 1.0]).unwrap_err();
        assert_eq!(err, InterpolationError::NotStrictlyIncreasing { index: 2 });
    }

    #[test]
    fn rejects_single_point() {
        assert!(matches!(
            MonotoneCubic::new(vec![1.0], vec![1.0]),
            Err(InterpolationError::TooFewPoints { .. })
        ));
    }

    #[test]
    fn linspace_hits_both_ends() {
        let v = linspace(10.0, 20.0, 5);
        assert_eq!(v, vec![10.0, 12.5, 15.0, 17.5, 20.0]);
        assert_eq!(linspace(1.0, 2.0, 500).len(), 500);
    }
}
