use crate::EffectKind;

/// Turns a capability outcome back into an app event.
///
/// Returning `None` means the outcome was not the shape the resolver expected.
pub type Resolver<Ev, Out> = Box<dyn FnOnce(Out) -> Option<Ev> + Send>;

/// One effect requested by `update`, plus how to continue once it is answered.
pub struct Step<Ev, Ef, Out> {
    pub effect: Ef,
    pub resolve: Option<Resolver<Ev, Out>>,
}

/// Generic command container - holds a batch of effect steps in order.
pub struct Command<Ev, Ef, Out>(Vec<Step<Ev, Ef, Out>>);

impl<Ev, Ef, Out> Command<Ev, Ef, Out> {
    /// No-op command - produces no effects
    pub fn none() -> Self {
        Command(Vec::new())
    }

    /// Single request whose outcome is fed back through `resolve`
    pub fn request(
        effect: Ef,
        resolve: impl FnOnce(Out) -> Option<Ev> + Send + 'static,
    ) -> Self {
        Command(vec![Step {
            effect,
            resolve: Some(Box::new(resolve)),
        }])
    }

    /// Batch multiple commands together
    pub fn batch(cmds: impl IntoIterator<Item = Command<Ev, Ef, Out>>) -> Self {
        let mut all = Vec::new();
        for Command(mut v) in cmds {
            all.append(&mut v);
        }
        Command(all)
    }

    /// Append another command after this one
    pub fn and(mut self, other: Command<Ev, Ef, Out>) -> Self {
        self.0.extend(other.0);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Access inner steps (for the engine)
    pub fn into_inner(self) -> Vec<Step<Ev, Ef, Out>> {
        self.0
    }
}

impl<Ev, Ef: EffectKind, Out> Command<Ev, Ef, Out> {
    /// Ask the shell to pull a fresh view
    pub fn render() -> Self {
        Command(vec![Step {
            effect: Ef::render(),
            resolve: None,
        }])
    }
}

impl<Ev, Ef, Out> Default for Command<Ev, Ef, Out> {
    fn default() -> Self {
        Self::none()
    }
}

impl<Ev, Ef: std::fmt::Debug, Out> std::fmt::Debug for Command<Ev, Ef, Out> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.0.iter().map(|step| &step.effect))
            .finish()
    }
}
