use crate::{
    camera::MotionPlan,
    error::{VitrineError, VitrineResult},
    scene::SceneBuilder,
};

/// Write the motion plan's two keyframe anchors: the start pose at frame 1
/// and the end pose at frame `frame_count`, on the plan's single channel
/// with the plan's interpolation.
///
/// Re-invoking with the same plan overwrites the anchors in place; the
/// channel never accumulates duplicates.
pub fn schedule_motion(
    scene: &mut dyn SceneBuilder,
    plan: &MotionPlan,
    frame_count: u32,
) -> VitrineResult<()> {
    if frame_count < 2 {
        return Err(VitrineError::invalid_frame_range(format!(
            "need at least 2 frames for start and end anchors, got {frame_count}"
        )));
    }

    let (start, end) = plan.endpoints();
    let target = plan.target();
    let channel = plan.channel();
    let interp = plan.interp();

    scene.insert_key(target, channel, 1, start, interp);
    scene.insert_key(target, channel, frame_count, end, interp);
    tracing::debug!(?channel, start, end, frame_count, "scheduled motion anchors");
    Ok(())
}
