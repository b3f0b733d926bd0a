use super::*;

/// Which components need retraining, decided by comparing the fingerprint
/// of the current inputs against the one stored with the latest model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FingerprintComparisonResult {
    pub core: bool,
    pub nlu: bool,
    pub nlg: bool,
    pub force_training: bool,
}

impl FingerprintComparisonResult {
    pub fn new(core: bool, nlu: bool, nlg: bool, force_training: bool) -> Self {
        Self {
            core,
            nlu,
            nlg,
            force_training,
        }
    }

    /// Without a previous fingerprint everything has to be trained.
    pub fn compare(new: &Fingerprint, old: Option<&Fingerprint>, force_training: bool) -> Self {
        match old {
            None => Self::new(true, true, true, force_training),
            Some(old) => {
                let core = new.changed(old, Section::Core);
                let nlu = new.changed(old, Section::Nlu);
                let nlg = new.changed(old, Section::Nlg);
                for section in Section::all() {
                    if new.changed(old, section) {
                        log::info!("{:<32}{:<32}", "fingerprint changed", section);
                    }
                }
                Self::new(core, nlu, nlg, force_training)
            }
        }
    }

    /// Components without any training data have nothing to retrain.
    /// Responses live in the Core model, so they go with it.
    pub fn restrict(self, core: bool, nlu: bool) -> Self {
        Self {
            core: self.core && core,
            nlu: self.nlu && nlu,
            nlg: self.nlg && core,
            force_training: self.force_training,
        }
    }

    pub fn should_retrain_core(&self) -> bool {
        self.force_training || self.core
    }

    pub fn should_retrain_nlu(&self) -> bool {
        self.force_training || self.nlu
    }

    pub fn should_retrain_nlg(&self) -> bool {
        self.force_training || self.nlg
    }

    pub fn is_training_required(&self) -> bool {
        self.should_retrain_core() || self.should_retrain_nlu() || self.should_retrain_nlg()
    }
}
