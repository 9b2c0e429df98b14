// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Mutable per-run state shared by hooks and step bodies.
//!
//! The [`Context`] is a bag of scope-tagged key/value pairs. Keys set while
//! a scenario is current are scenario-scoped and removed when the scenario
//! ends; feature- and suite-scoped keys survive scenario boundaries but not
//! their own. Removal means removal: after a scenario, its keys are
//! entirely absent, not reset to an empty value.

use linked_hash_map::LinkedHashMap;

use crate::value::Value;

/// Lifetime scope of a [`Context`] key.
///
/// Scopes nest: `Suite` ⊃ `Feature` ⊃ `Scenario`. Leaving a scope removes
/// its keys and the keys of every scope nested inside it.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum Scope {
    /// Lives for the whole run.
    Suite,

    /// Lives until the current feature ends.
    Feature,

    /// Lives until the current scenario ends.
    Scenario,
}

/// The mutable state bag shared by reference across all hooks and step
/// bodies of a run.
///
/// Owned by the runner; single-threaded by design, so no locking. The
/// runner enters/leaves scopes at suite, feature and scenario boundaries;
/// clients only read and write keys.
#[derive(Debug, Default)]
pub struct Context {
    values: LinkedHashMap<String, (Scope, Value)>,
    current: Scope,
}

impl Default for Scope {
    fn default() -> Self {
        Self::Suite
    }
}

impl Context {
    /// Creates a new empty [`Context`] at suite scope.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns the currently active [`Scope`].
    #[must_use]
    pub fn scope(&self) -> Scope {
        self.current
    }

    /// Sets `key` to `value`, tagged with the currently active scope.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let scope = self.current;
        self.set_scoped(scope, key, value);
    }

    /// Sets `key` to `value`, tagged with an explicit scope.
    ///
    /// Lets a step body stash feature- or suite-lived state (a counter, a
    /// shared fixture handle) without being at that scope.
    pub fn set_scoped(
        &mut self,
        scope: Scope,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) {
        _ = self.values.insert(key.into(), (scope, value.into()));
    }

    /// Returns the value under `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key).map(|(_, v)| v)
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Removes and returns the value under `key`.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key).map(|(_, v)| v)
    }

    /// Returns the value under `key` as a [`bool`].
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// Returns the value under `key` as an integer.
    #[must_use]
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_int)
    }

    /// Returns the value under `key` as a float, widening integers.
    #[must_use]
    pub fn get_float(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_float)
    }

    /// Returns the value under `key` as text.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Returns all present keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Enters the given [`Scope`]: subsequent [`Context::set()`] calls tag
    /// keys with it.
    pub(crate) fn enter(&mut self, scope: Scope) {
        self.current = scope;
    }

    /// Leaves the given [`Scope`]: removes every key tagged with it or any
    /// scope nested inside it, and makes the enclosing scope current.
    ///
    /// The removal happens in one pass before the scope switches, so no
    /// caller observes a partially reset bag.
    pub(crate) fn exit(&mut self, scope: Scope) {
        let stale = self
            .values
            .iter()
            .filter(|(_, (s, _))| *s >= scope)
            .map(|(k, _)| k.clone())
            .collect::<Vec<_>>();
        for key in stale {
            _ = self.values.remove(&key);
        }
        self.current = match scope {
            Scope::Scenario => Scope::Feature,
            Scope::Feature | Scope::Suite => Scope::Suite,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_tags_with_the_current_scope() {
        let mut ctx = Context::new();
        ctx.set("suite_key", 1_i64);
        ctx.enter(Scope::Feature);
        ctx.set("feature_key", 2_i64);
        ctx.enter(Scope::Scenario);
        ctx.set("scenario_key", 3_i64);

        ctx.exit(Scope::Scenario);
        assert!(ctx.contains("suite_key"));
        assert!(ctx.contains("feature_key"));
        assert!(!ctx.contains("scenario_key"));
    }

    #[test]
    fn leaving_a_feature_also_drops_scenario_keys() {
        let mut ctx = Context::new();
        ctx.enter(Scope::Feature);
        ctx.set("feature_key", true);
        ctx.enter(Scope::Scenario);
        ctx.set("scenario_key", true);

        // Feature teardown without an intervening scenario exit.
        ctx.exit(Scope::Feature);
        assert!(!ctx.contains("feature_key"));
        assert!(!ctx.contains("scenario_key"));
        assert_eq!(ctx.scope(), Scope::Suite);
    }

    #[test]
    fn removed_keys_are_absent_not_empty() {
        let mut ctx = Context::new();
        ctx.enter(Scope::Scenario);
        ctx.set("errors", "none");
        ctx.exit(Scope::Scenario);
        assert_eq!(ctx.get("errors"), None);
        assert!(!ctx.contains("errors"));
    }

    #[test]
    fn set_scoped_outlives_the_current_scope() {
        let mut ctx = Context::new();
        ctx.enter(Scope::Scenario);
        ctx.set_scoped(Scope::Feature, "login_count", 1_i64);
        ctx.exit(Scope::Scenario);
        assert_eq!(ctx.get_int("login_count"), Some(1));
        ctx.exit(Scope::Feature);
        assert_eq!(ctx.get_int("login_count"), None);
    }

    #[test]
    fn typed_getters_read_through_the_value_union() {
        let mut ctx = Context::new();
        ctx.set("debug", true);
        ctx.set("count", 3_i64);
        ctx.set("ratio", 0.5_f64);
        ctx.set("page", "login");

        assert_eq!(ctx.get_bool("debug"), Some(true));
        assert_eq!(ctx.get_int("count"), Some(3));
        assert_eq!(ctx.get_float("count"), Some(3.0));
        assert_eq!(ctx.get_float("ratio"), Some(0.5));
        assert_eq!(ctx.get_str("page"), Some("login"));
        assert_eq!(ctx.get_int("page"), None);
    }

    #[test]
    fn overwriting_retags_the_scope() {
        let mut ctx = Context::new();
        ctx.set("key", 1_i64);
        ctx.enter(Scope::Scenario);
        ctx.set("key", 2_i64);
        ctx.exit(Scope::Scenario);
        // The scenario-scoped overwrite took the key with it.
        assert_eq!(ctx.get_int("key"), None);
    }

    #[test]
    fn keys_iterate_in_insertion_order() {
        let mut ctx = Context::new();
        ctx.set("b", 1_i64);
        ctx.set("a", 2_i64);
        assert_eq!(ctx.keys().collect::<Vec<_>>(), vec!["b", "a"]);
    }

    #[test]
    fn exit_suite_clears_everything() {
        let mut ctx = Context::new();
        ctx.set("key", 1_i64);
        ctx.enter(Scope::Feature);
        ctx.set("other", 2_i64);
        ctx.exit(Scope::Suite);
        assert_eq!(ctx.keys().count(), 0);
    }
}
