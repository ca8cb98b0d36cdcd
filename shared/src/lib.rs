pub mod colors;
pub mod control;
pub mod counties;
pub mod geometry;
pub mod japanese;
pub mod ming;
pub mod modern;
pub mod period;
pub mod qing;
pub mod topology;

pub use colors::Rgb;
pub use geometry::{Bounds, Feature, FeatureCollection, LonLat, Polygon, Ring};
pub use period::{GeometrySources, Period, PeriodInfo, SourceFile};
pub use topology::{Decoded, Topology, TopologyError};
