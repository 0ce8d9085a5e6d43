use super::FieldCore;

/// Cap on banked simulation time. A tab that was backgrounded for seconds
/// resumes with at most this much catch-up instead of a step avalanche.
const MAX_BANKED_MS: f64 = 250.0;

/// Fixed-timestep pump. The caller hands in a monotonic clock reading
/// (performance.now() on the web side); elapsed wall time is banked and
/// consumed in whole fixed steps, so physics cadence never depends on how
/// often the host repaints.
pub(super) fn pump(core: &mut FieldCore, now_ms: f64) {
    if core.destroyed {
        return;
    }

    let last = core.last_pump_ms.replace(now_ms);
    // First pump only establishes the clock
    let Some(last) = last else {
        return;
    };

    let elapsed = (now_ms - last).max(0.0);
    core.step_acc_ms = (core.step_acc_ms + elapsed).min(MAX_BANKED_MS);

    let step_ms = core.config.step_ms;
    if step_ms <= 0.0 {
        return;
    }
    let dt = (step_ms / 1000.0) as f32;

    while core.step_acc_ms >= step_ms {
        core.world.step(dt);
        core.step_acc_ms -= step_ms;
        core.frame += 1;
    }
}
