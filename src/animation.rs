#[derive(Clone, Debug, PartialEq)]
pub struct FrameAnimator {
    frame_count: usize,
    index: i32,
    direction: i32,
    elapsed: f32,
}

impl FrameAnimator {
    pub fn new(frame_count: usize) -> Self {
        Self {
            frame_count,
            index: 0,
            direction: 1,
            elapsed: 0.0,
        }
    }

    pub fn frame(&self) -> usize {
        self.index.max(0) as usize
    }

    pub fn restart(&mut self) {
        self.index = 0;
        self.direction = 1;
        self.elapsed = 0.0;
    }

    pub fn restart_reversed(&mut self) {
        self.index = self.frame_count as i32 - 1;
        self.direction = -1;
        self.elapsed = 0.0;
    }

    pub fn switch_to(&mut self, frame_count: usize) {
        self.frame_count = frame_count;
        self.restart();
    }

    fn step_due(&mut self, dt: f32, frame_secs: f32) -> bool {
        self.elapsed += dt;
        if self.elapsed < frame_secs {
            return false;
        }
        self.elapsed -= frame_secs;
        true
    }

    pub fn tick_ping_pong(&mut self, dt: f32, frame_secs: f32) -> bool {
        if !self.step_due(dt, frame_secs) || self.frame_count <= 1 {
            return false;
        }
        self.index += self.direction;
        if self.index <= 0 || self.index >= self.frame_count as i32 - 1 {
            self.index = self.index.clamp(0, self.frame_count as i32 - 1);
            self.direction = -self.direction;
            return true;
        }
        false
    }

    pub fn tick_looping(&mut self, dt: f32, frame_secs: f32) -> bool {
        if !self.step_due(dt, frame_secs) {
            return false;
        }
        self.index += self.direction;
        if self.index >= self.frame_count as i32 {
            self.index = 0;
            return true;
        }
        if self.index < 0 {
            self.index = (self.frame_count as i32 - 1).max(0);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::FrameAnimator;

    #[test]
    fn ping_pong_reverses_at_both_ends() {
        let mut anim = FrameAnimator::new(3);
        let mut frames = Vec::new();
        for _ in 0..6 {
            anim.tick_ping_pong(0.1, 0.1);
            frames.push(anim.frame());
        }
        assert_eq!(frames, vec![1, 2, 1, 0, 1, 2]);
    }

    #[test]
    fn looping_reports_wrap_once_per_cycle() {
        let mut anim = FrameAnimator::new(3);
        let wraps: Vec<bool> = (0..6).map(|_| anim.tick_looping(0.2, 0.2)).collect();
        assert_eq!(wraps, vec![false, false, true, false, false, true]);
    }

    #[test]
    fn reversed_loop_wraps_below_zero() {
        let mut anim = FrameAnimator::new(3);
        anim.restart_reversed();
        assert_eq!(anim.frame(), 2);
        assert!(!anim.tick_looping(0.2, 0.2));
        assert!(!anim.tick_looping(0.2, 0.2));
        assert!(anim.tick_looping(0.2, 0.2));
        assert_eq!(anim.frame(), 2);
    }

    #[test]
    fn short_ticks_accumulate() {
        let mut anim = FrameAnimator::new(4);
        assert!(!anim.tick_looping(0.05, 0.15));
        assert!(!anim.tick_looping(0.05, 0.15));
        assert_eq!(anim.frame(), 0);
        anim.tick_looping(0.06, 0.15);
        assert_eq!(anim.frame(), 1);
    }

    #[test]
    fn single_frame_ping_pong_stays_put() {
        let mut anim = FrameAnimator::new(1);
        for _ in 0..4 {
            assert!(!anim.tick_ping_pong(1.0, 0.1));
        }
        assert_eq!(anim.frame(), 0);
    }
}
