/// Carrots collected during the current run. Only ever goes up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Score {
    carrots: u32,
}

impl Score {
    pub fn carrots(&self) -> u32 {
        self.carrots
    }

    pub fn increment(&mut self) -> u32 {
        self.carrots = self.carrots.saturating_add(1);
        self.carrots
    }

    pub fn text(&self) -> String {
        format!("Carrots: {}", self.carrots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_up_by_one() {
        let mut score = Score::default();
        assert_eq!(score.text(), "Carrots: 0");
        assert_eq!(score.increment(), 1);
        assert_eq!(score.increment(), 2);
        assert_eq!(score.text(), "Carrots: 2");
    }
}
