//! Hook registry for managing and executing command hooks.

use std::sync::Arc;

use tracing::{debug, error};

use super::{CommandHook, HookCriticality};
use crate::api::{Result, RuntimeError};

/// Which side of the handler a hook runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookPhase {
    Pre,
    Post,
}

impl HookPhase {
    fn as_str(self) -> &'static str {
        match self {
            Self::Pre => "pre",
            Self::Post => "post",
        }
    }
}

/// Ordered pre- and post-command hook lists.
pub struct HookRegistry<C> {
    pre: Vec<Arc<dyn CommandHook<C>>>,
    post: Vec<Arc<dyn CommandHook<C>>>,
}

impl<C> HookRegistry<C> {
    pub fn new() -> Self {
        Self {
            pre: Vec::new(),
            post: Vec::new(),
        }
    }

    /// Adds a hook to `phase`, keeping the list sorted by priority.
    ///
    /// The sort is stable, so equal priorities run in registration order.
    pub fn register(&mut self, phase: HookPhase, hook: Arc<dyn CommandHook<C>>) {
        let hooks = self.hooks_mut(phase);
        hooks.push(hook);
        hooks.sort_by_key(|h| h.priority());
    }

    /// Runs every hook of `phase` in priority order.
    ///
    /// # Error Handling
    ///
    /// - `Critical`: returns the error immediately
    /// - `Important`: logs the error and continues
    /// - `Optional`: logs at debug level and continues
    pub fn execute(&self, phase: HookPhase, ctx: &mut C, args: &[&str]) -> Result<()> {
        for hook in self.hooks(phase) {
            if !hook.should_trigger(ctx) {
                continue;
            }
            if let Err(e) = hook.run(ctx, args) {
                Self::handle_hook_error(phase, hook.as_ref(), e)?;
            }
        }
        Ok(())
    }

    pub fn len(&self, phase: HookPhase) -> usize {
        self.hooks(phase).len()
    }

    pub fn is_empty(&self) -> bool {
        self.pre.is_empty() && self.post.is_empty()
    }

    /// Hook names and priorities of `phase`, in execution order.
    pub fn names(&self, phase: HookPhase) -> impl Iterator<Item = (&'static str, i32)> + '_ {
        self.hooks(phase).iter().map(|h| (h.name(), h.priority()))
    }

    fn hooks(&self, phase: HookPhase) -> &[Arc<dyn CommandHook<C>>] {
        match phase {
            HookPhase::Pre => &self.pre,
            HookPhase::Post => &self.post,
        }
    }

    fn hooks_mut(&mut self, phase: HookPhase) -> &mut Vec<Arc<dyn CommandHook<C>>> {
        match phase {
            HookPhase::Pre => &mut self.pre,
            HookPhase::Post => &mut self.post,
        }
    }

    fn handle_hook_error(
        phase: HookPhase,
        hook: &dyn CommandHook<C>,
        error: RuntimeError,
    ) -> Result<()> {
        match hook.criticality() {
            HookCriticality::Critical => {
                error!(
                    target: "runtime::hooks",
                    hook = hook.name(),
                    phase = phase.as_str(),
                    criticality = "critical",
                    error = %error,
                    "Critical hook failed, aborting"
                );
                Err(error)
            }
            HookCriticality::Important => {
                error!(
                    target: "runtime::hooks",
                    hook = hook.name(),
                    phase = phase.as_str(),
                    criticality = "important",
                    error = %error,
                    "Hook failed, continuing"
                );
                Ok(())
            }
            HookCriticality::Optional => {
                debug!(
                    target: "runtime::hooks",
                    hook = hook.name(),
                    phase = phase.as_str(),
                    error = %error,
                    "Optional hook failed"
                );
                Ok(())
            }
        }
    }
}

impl<C> Default for HookRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct Trace(Vec<&'static str>);

    struct Named {
        name: &'static str,
        priority: i32,
        criticality: HookCriticality,
        fails: bool,
    }

    impl Named {
        fn new(name: &'static str, priority: i32) -> Self {
            Self {
                name,
                priority,
                criticality: HookCriticality::Important,
                fails: false,
            }
        }
    }

    impl CommandHook<Trace> for Named {
        fn name(&self) -> &'static str {
            self.name
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn criticality(&self) -> HookCriticality {
            self.criticality
        }

        fn run(&self, ctx: &mut Trace, _args: &[&str]) -> Result<()> {
            ctx.0.push(self.name);
            if self.fails {
                return Err(RuntimeError::Hook {
                    hook: self.name,
                    reason: "boom".into(),
                });
            }
            Ok(())
        }
    }

    #[test]
    fn hooks_run_by_priority_then_registration() {
        let mut registry = HookRegistry::new();
        registry.register(HookPhase::Post, Arc::new(Named::new("b", 0)));
        registry.register(HookPhase::Post, Arc::new(Named::new("a", -5)));
        registry.register(HookPhase::Post, Arc::new(Named::new("c", 0)));
        registry.register(HookPhase::Pre, Arc::new(Named::new("pre", 0)));

        let mut trace = Trace::default();
        registry.execute(HookPhase::Post, &mut trace, &[]).unwrap();
        assert_eq!(trace.0, ["a", "b", "c"]);
        assert_eq!(registry.len(HookPhase::Pre), 1);
    }

    #[test]
    fn important_failures_do_not_stop_the_phase() {
        let mut registry = HookRegistry::new();
        let mut failing = Named::new("failing", 0);
        failing.fails = true;
        registry.register(HookPhase::Pre, Arc::new(failing));
        registry.register(HookPhase::Pre, Arc::new(Named::new("after", 1)));

        let mut trace = Trace::default();
        assert!(registry.execute(HookPhase::Pre, &mut trace, &[]).is_ok());
        assert_eq!(trace.0, ["failing", "after"]);
    }

    #[test]
    fn critical_failures_abort() {
        let mut registry = HookRegistry::new();
        let mut failing = Named::new("failing", 0);
        failing.fails = true;
        failing.criticality = HookCriticality::Critical;
        registry.register(HookPhase::Pre, Arc::new(failing));
        registry.register(HookPhase::Pre, Arc::new(Named::new("after", 1)));

        let mut trace = Trace::default();
        let result = registry.execute(HookPhase::Pre, &mut trace, &[]);
        assert!(matches!(result, Err(RuntimeError::Hook { hook: "failing", .. })));
        assert_eq!(trace.0, ["failing"]);
    }

    #[test]
    fn skipped_hooks_do_not_run() {
        struct Never(Mutex<u32>);
        impl CommandHook<Trace> for Never {
            fn name(&self) -> &'static str {
                "never"
            }
            fn should_trigger(&self, _ctx: &Trace) -> bool {
                false
            }
            fn run(&self, _ctx: &mut Trace, _args: &[&str]) -> Result<()> {
                *self.0.lock().unwrap() += 1;
                Ok(())
            }
        }

        let never = Arc::new(Never(Mutex::new(0)));
        let mut registry = HookRegistry::new();
        registry.register(HookPhase::Post, never.clone());
        registry.execute(HookPhase::Post, &mut Trace::default(), &[]).unwrap();
        assert_eq!(*never.0.lock().unwrap(), 0);
    }
}
