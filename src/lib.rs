//! 유정 유입 성능(IPR) 계산 로직을 라이브러리로 분리하여 CLI 뿐 아니라 다른 화면(대시보드 등)에서도 재사용한다.

pub mod app;
pub mod config;
pub mod i18n;
pub mod inflow;
pub mod interpolation;
pub mod single_phase;
pub mod ui_cli;

pub use inflow::{
    absolute_open_flow, bubble_point_rate, ipr_curve, productivity_index, qo, rate_at_pressure,
    InflowError, IprCurve, IprMethod, WellTest,
};
pub use single_phase::{single_phase_j, single_phase_q, FlowRegime, RadialFlowInput};
