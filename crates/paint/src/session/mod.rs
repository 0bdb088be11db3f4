mod context;
mod digest;
mod primitive;
mod sink;

pub use context::{
    PaintContext, Segment, SegmentSet, SegmentSupport, SupportHeights, TunnelEntry, TunnelRun,
    TunnelRunError, TunnelRuns, TUNNEL_RUN_CAPACITY, TUNNEL_SENTINEL,
};
pub use digest::digest_paint_list;
pub use primitive::{AttachedImage, BoundBox, InteractionKind, PaintPrimitive};
pub use sink::{PaintList, PaintSink};
