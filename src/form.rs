// Contact form with a simulated submission: no request is sent, the button just
// walks through sending and sent states on a fixed timeline before the form resets.

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FormPhase {
    Idle,
    Sending { since: f64 },
    Sent { since: f64 },
}

#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    // Indices of required fields that are blank after trimming
    Rejected(Vec<usize>),
    // A submission is already in flight
    Busy,
    Sending,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FormTransition {
    Sent,
    // Back to idle: restore the button and clear the fields
    Reset,
}

/// What the submit button should look like in a phase.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ButtonView {
    pub disabled: bool,
    // None means the button's original markup
    pub label_html: Option<&'static str>,
    pub success_style: bool,
}

pub struct ContactForm {
    phase: FormPhase,
}

impl ContactForm {
    pub const SENDING_MS: f64 = 1400.0;
    pub const SENT_MS: f64 = 3500.0;

    pub const SENDING_LABEL: &'static str = "<i class=\"fas fa-circle-notch fa-spin\"></i> Enviando...";
    pub const SENT_LABEL: &'static str = "<i class=\"fas fa-check-circle\"></i> Mensagem Enviada!";

    pub fn new() -> ContactForm {
        ContactForm {
            phase: FormPhase::Idle,
        }
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn submit<S: AsRef<str>>(&mut self, now: f64, required: &[S]) -> SubmitOutcome {
        if self.phase != FormPhase::Idle {
            return SubmitOutcome::Busy;
        }
        let blank: Vec<usize> = required
            .iter()
            .enumerate()
            .filter(|(_, value)| value.as_ref().trim().is_empty())
            .map(|(i, _)| i)
            .collect();
        if !blank.is_empty() {
            return SubmitOutcome::Rejected(blank);
        }
        self.phase = FormPhase::Sending { since: now };
        SubmitOutcome::Sending
    }

    // Milliseconds until the next transition, None when idle
    pub fn time_until_next(&self, now: f64) -> Option<f64> {
        let deadline = match self.phase {
            FormPhase::Idle => return None,
            FormPhase::Sending { since } => since + ContactForm::SENDING_MS,
            FormPhase::Sent { since } => since + ContactForm::SENT_MS,
        };
        Some((deadline - now).max(0.0))
    }

    /// Moves along the timeline if the current phase has run its course.
    pub fn advance(&mut self, now: f64) -> Option<FormTransition> {
        match self.phase {
            FormPhase::Sending { since } if now >= since + ContactForm::SENDING_MS => {
                self.phase = FormPhase::Sent { since: now };
                Some(FormTransition::Sent)
            }
            FormPhase::Sent { since } if now >= since + ContactForm::SENT_MS => {
                self.phase = FormPhase::Idle;
                Some(FormTransition::Reset)
            }
            _ => None,
        }
    }

    pub fn button(&self) -> ButtonView {
        match self.phase {
            FormPhase::Idle => ButtonView {
                disabled: false,
                label_html: None,
                success_style: false,
            },
            FormPhase::Sending { .. } => ButtonView {
                disabled: true,
                label_html: Some(ContactForm::SENDING_LABEL),
                success_style: false,
            },
            FormPhase::Sent { .. } => ButtonView {
                disabled: true,
                label_html: Some(ContactForm::SENT_LABEL),
                success_style: true,
            },
        }
    }
}

impl Default for ContactForm {
    fn default() -> Self {
        ContactForm::new()
    }
}
