pub mod tracker;

pub use tracker::{
    Decision, GestureSample, GestureSettings, GestureTracker, ReleaseMetric, decide, displacement,
};
