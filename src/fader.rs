//! Triangle-wave duty sequence for the LED fade.

/// Duty walks from 0 to `max` and back by `step`, reversing at each end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fader {
    duty: u32,
    step: i32,
    max: u32,
}

impl Fader {
    /// Starts at duty 0, rising by one count per advance.
    pub const fn new(max: u32) -> Self {
        Fader {
            duty: 0,
            step: 1,
            max,
        }
    }

    pub fn duty(&self) -> u32 {
        self.duty
    }

    pub fn step(&self) -> i32 {
        self.step
    }

    /// Move one step. Reaching 0 or `max` flips the direction.
    pub fn advance(&mut self) {
        let next = (self.duty as i64 + self.step as i64).clamp(0, self.max as i64);
        self.duty = next as u32;
        if self.duty == self.max || self.duty == 0 {
            self.step = -self.step;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rises_to_max_then_falls_to_zero() {
        let max = 1023;
        let mut fader = Fader::new(max);

        for i in 1..=max {
            fader.advance();
            assert_eq!(fader.duty(), i);
        }
        assert_eq!(fader.step(), -1);

        for i in 1..=max {
            fader.advance();
            assert_eq!(fader.duty(), max - i);
        }
        assert_eq!(fader.step(), 1);
    }

    #[test]
    fn period_is_twice_max() {
        let mut fader = Fader::new(7);
        let start = fader;
        let mut seen = Vec::new();
        for _ in 0..14 {
            fader.advance();
            seen.push(fader.duty());
        }
        assert_eq!(seen, [1, 2, 3, 4, 5, 6, 7, 6, 5, 4, 3, 2, 1, 0]);
        assert_eq!(fader, start);
    }

    #[test]
    fn never_leaves_range() {
        let mut fader = Fader::new(3);
        for _ in 0..100 {
            fader.advance();
            assert!(fader.duty() <= 3);
        }
    }
}
