//! Attack-release envelope.
//!
//! Exponential attack toward an overshoot target and exponential release,
//! holding full level while the gate is open. Zero times switch instantly.

/// Envelope states
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EnvelopeState {
    /// Inactive; output is zero.
    #[default]
    Idle,
    /// Rising toward full level.
    Attack,
    /// Holding full level while the gate is open.
    Hold,
    /// Falling to zero after the gate closed.
    Release,
}

/// Level below which the release snaps to zero.
const SILENCE: f32 = 0.0001;

/// Attack aims past 1.0 so the curve reaches full level in finite time.
const ATTACK_TARGET: f32 = 1.2;

/// Attack-release envelope generator.
///
/// # Example
///
/// ```rust
/// use oro_synth::ArEnvelope;
///
/// let mut env = ArEnvelope::new(48000.0);
/// env.set_attack_ms(10.0);
/// env.set_release_ms(200.0);
///
/// env.gate_on();
/// for _ in 0..1000 {
///     let _level = env.advance();
/// }
/// env.gate_off();
/// ```
#[derive(Debug, Clone)]
pub struct ArEnvelope {
    state: EnvelopeState,
    level: f32,
    sample_rate: f32,
    attack_ms: f32,
    release_ms: f32,
    attack_coeff: f32,
    release_coeff: f32,
}

impl Default for ArEnvelope {
    fn default() -> Self {
        Self::new(44100.0)
    }
}

impl ArEnvelope {
    /// Create an envelope with 5 ms attack and 50 ms release.
    pub fn new(sample_rate: f32) -> Self {
        let mut env = Self {
            state: EnvelopeState::Idle,
            level: 0.0,
            sample_rate,
            attack_ms: 5.0,
            release_ms: 50.0,
            attack_coeff: 0.0,
            release_coeff: 0.0,
        };
        env.recalculate_coefficients();
        env
    }

    /// Set attack time in milliseconds. Zero jumps straight to full level.
    pub fn set_attack_ms(&mut self, ms: f32) {
        self.attack_ms = ms.max(0.0);
        self.attack_coeff = self.coeff_for(self.attack_ms);
    }

    /// Attack time in milliseconds.
    pub fn attack_ms(&self) -> f32 {
        self.attack_ms
    }

    /// Set release time in milliseconds. Zero cuts off immediately.
    pub fn set_release_ms(&mut self, ms: f32) {
        self.release_ms = ms.max(0.0);
        self.release_coeff = self.coeff_for(self.release_ms);
    }

    /// Release time in milliseconds.
    pub fn release_ms(&self) -> f32 {
        self.release_ms
    }

    /// Set sample rate.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recalculate_coefficients();
    }

    /// Open the gate. The level is kept for smooth retriggering.
    pub fn gate_on(&mut self) {
        if self.attack_ms <= 0.0 {
            self.level = 1.0;
            self.state = EnvelopeState::Hold;
        } else {
            self.state = EnvelopeState::Attack;
        }
    }

    /// Close the gate.
    pub fn gate_off(&mut self) {
        if self.state == EnvelopeState::Idle {
            return;
        }
        if self.release_ms <= 0.0 {
            self.reset();
        } else {
            self.state = EnvelopeState::Release;
        }
    }

    /// Force the envelope to idle.
    pub fn reset(&mut self) {
        self.state = EnvelopeState::Idle;
        self.level = 0.0;
    }

    /// Current state.
    pub fn state(&self) -> EnvelopeState {
        self.state
    }

    /// Current level without advancing.
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Whether the envelope produces output.
    pub fn is_active(&self) -> bool {
        self.state != EnvelopeState::Idle
    }

    /// Advance by one sample and return the new level.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        match self.state {
            EnvelopeState::Idle => {
                self.level = 0.0;
            }
            EnvelopeState::Attack => {
                self.level = ATTACK_TARGET + (self.level - ATTACK_TARGET) * self.attack_coeff;
                if self.level >= 1.0 {
                    self.level = 1.0;
                    self.state = EnvelopeState::Hold;
                }
            }
            EnvelopeState::Hold => {
                self.level = 1.0;
            }
            EnvelopeState::Release => {
                self.level *= self.release_coeff;
                if self.level < SILENCE {
                    self.reset();
                }
            }
        }
        self.level
    }

    fn recalculate_coefficients(&mut self) {
        self.attack_coeff = self.coeff_for(self.attack_ms);
        self.release_coeff = self.coeff_for(self.release_ms);
    }

    /// One-pole coefficient reaching ~63% of the distance in `ms`.
    fn coeff_for(&self, ms: f32) -> f32 {
        let samples = ms * self.sample_rate / 1000.0;
        (-1.0 / samples.max(1.0)).exp()
    }
}
