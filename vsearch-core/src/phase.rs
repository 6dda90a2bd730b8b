/// Session phases, one per host scene.
#[derive(Copy, Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    /// Participant details are being collected.
    #[default]
    Intro,
    Experiment,
    End,
}

impl Phase {
    pub fn allows_response(&self) -> bool {
        matches!(self, Phase::Experiment)
    }

    pub fn next(&self) -> Option<Self> {
        use Phase::*;
        Some(match self {
            Intro => Experiment,
            Experiment => End,
            End => return None,
        })
    }

    pub fn is_intro(&self) -> bool {
        matches!(self, Phase::Intro)
    }

    pub fn is_experiment(&self) -> bool {
        matches!(self, Phase::Experiment)
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Phase::End)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_advance_in_order_and_stop_at_end() {
        let mut phase = Phase::default();
        assert!(phase.is_intro());
        phase = phase.next().unwrap();
        assert!(phase.is_experiment() && phase.allows_response());
        phase = phase.next().unwrap();
        assert!(phase.is_end());
        assert_eq!(phase.next(), None);
    }
}
