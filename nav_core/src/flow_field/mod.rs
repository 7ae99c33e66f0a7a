//! Stage 7: Flow Field Engine — builds and expires per-chunk Dijkstra
//! wavefields for crowded destinations (`spec.md` §4.5), and samples them
//! for each follower. Split into `builder` (writes `FlowFieldData`) and
//! `sampler` (reads it into the per-frame `SampledFlowDirections` scratch
//! the flow-field follower consumes), matching the Chunk Manager /
//! Chunk Baker split for streaming.

pub mod builder;
pub mod sampler;
