use crate::dot::Dot;

/// Drains `eraser_queue`, dropping every active dot hit by an eraser dot (or by its mirror image
/// when `reflect` is set). Survivors of one eraser dot are the working set for the next one and
/// keep their oldest-first order. Returns the number of dots removed.
pub fn reconcile(
    active: &mut Vec<Dot>,
    eraser_queue: &mut Vec<Dot>,
    reflect: bool,
    angular_step: f64,
) -> usize {
    let before = active.len();

    while let Some(eraser) = eraser_queue.pop() {
        let reflected = reflect.then(|| eraser.reflected());
        active.retain(|dot| {
            let hit = eraser.overlaps(dot, angular_step)
                || reflected.is_some_and(|r| r.overlaps(dot, angular_step));
            !hit
        });
    }

    let removed = before - active.len();
    if removed > 0 {
        log::debug!("eraser removed {} dots, {} remain", removed, active.len());
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Polar;
    use palette::Srgba;
    use std::f64::consts::PI;

    const QUARTER: f64 = PI / 2.0;

    fn dot(fraction: f64, radius: f64, size: u32) -> Dot {
        Dot::new(Polar::new(fraction, radius), size, Srgba::new(0.0, 0.0, 1.0, 1.0))
    }

    #[test]
    fn test_empty_queue_is_noop() {
        let mut active = vec![dot(0.1, 10.0, 5), dot(0.9, 80.0, 5)];
        let snapshot = active.clone();
        let removed = reconcile(&mut active, &mut Vec::new(), true, QUARTER);
        assert_eq!(removed, 0);
        assert_eq!(active, snapshot);
    }

    #[test]
    fn test_removes_only_dots_within_eraser_reach() {
        let near = dot(0.05, 102.0, 10);
        let far = dot(0.5, 100.0, 10);
        let mut active = vec![near, far];
        let mut queue = vec![dot(0.0, 100.0, 20)];

        let removed = reconcile(&mut active, &mut queue, false, QUARTER);

        assert_eq!(removed, 1);
        assert_eq!(active, vec![far]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_reflected_eraser_hits_mirrored_dots() {
        let mirrored = dot(0.95, 100.0, 10);
        let mut without = vec![mirrored];
        reconcile(&mut without, &mut vec![dot(0.0, 100.0, 20)], false, QUARTER);
        assert_eq!(without.len(), 1);

        let mut with = vec![mirrored];
        reconcile(&mut with, &mut vec![dot(0.0, 100.0, 20)], true, QUARTER);
        assert!(with.is_empty());
    }

    #[test]
    fn test_every_queued_eraser_dot_is_applied() {
        let a = dot(0.1, 50.0, 4);
        let b = dot(0.5, 50.0, 4);
        let c = dot(0.9, 50.0, 4);
        let d = dot(0.5, 200.0, 4);
        let mut active = vec![a, b, c, d];
        let mut queue = vec![dot(0.1, 50.0, 6), dot(0.9, 50.0, 6), dot(0.5, 200.0, 6)];

        let removed = reconcile(&mut active, &mut queue, false, QUARTER);

        assert_eq!(removed, 3);
        assert_eq!(active, vec![b]);
    }

    #[test]
    fn test_survivors_keep_draw_order() {
        let dots: Vec<Dot> = (0..6).map(|i| dot(0.5, 20.0 * i as f64 + 100.0, 3)).collect();
        let mut active = dots.clone();
        reconcile(&mut active, &mut vec![dot(0.5, 140.0, 5)], false, QUARTER);
        let expected: Vec<Dot> = dots
            .iter()
            .copied()
            .filter(|d| d.radius_from_center() != 140.0)
            .collect();
        assert_eq!(active, expected);
    }
}
