use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    error::ValidationError,
    models::{AlertRule, NewAlertRule},
};

/// User alert rules, in creation order.
#[derive(Debug, Default, Clone)]
pub struct RuleStore {
    rules: Vec<AlertRule>,
}

/// Checks a create request without touching any store.
pub fn validate(new: &NewAlertRule) -> Result<(), ValidationError> {
    if new.symbol.trim().is_empty() {
        return Err(ValidationError::MissingSymbol);
    }

    if new.right_type.needs_value() {
        match new.right_value {
            None => return Err(ValidationError::MissingRightValue(new.right_type)),
            Some(v) if !v.is_finite() => {
                return Err(ValidationError::NonFiniteRightValue(new.right_type));
            }
            Some(_) => {}
        }
    }

    Ok(())
}

impl RuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, new: NewAlertRule) -> Result<AlertRule, ValidationError> {
        self.create_at(new, Utc::now())
    }

    pub fn create_at(
        &mut self,
        new: NewAlertRule,
        now: DateTime<Utc>,
    ) -> Result<AlertRule, ValidationError> {
        validate(&new)?;

        let right_value = if new.right_type.needs_value() {
            new.right_value
        } else {
            None
        };

        let rule = AlertRule {
            id: Uuid::new_v4(),
            symbol: new.symbol.trim().to_uppercase(),
            operator: new.operator,
            right_type: new.right_type,
            right_value,
            triggered: false,
            is_active: true,
            created_at: now,
            triggered_at: None,
        };

        self.rules.push(rule.clone());
        Ok(rule)
    }

    /// Unknown ids are a no-op.
    pub fn remove(&mut self, id: Uuid) -> Option<AlertRule> {
        let pos = self.rules.iter().position(|r| r.id == id)?;
        Some(self.rules.remove(pos))
    }

    /// Owned copy of the current rules; evaluation never sees later mutations.
    pub fn list(&self) -> Vec<AlertRule> {
        self.rules.clone()
    }

    pub fn get(&self, id: Uuid) -> Option<&AlertRule> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// Re-enabling a rule clears its triggered state, so a condition that still
    /// holds is reported by the next rule tick.
    pub fn set_active(&mut self, id: Uuid, active: bool) -> Option<AlertRule> {
        let rule = self.rules.iter_mut().find(|r| r.id == id)?;
        if active && !rule.is_active {
            rule.triggered = false;
            rule.triggered_at = None;
        }
        rule.is_active = active;
        Some(rule.clone())
    }

    /// Writes evaluation results back by id and returns the rules that just
    /// went from untriggered to triggered. Ids no longer in the store are ignored.
    pub fn record_results(
        &mut self,
        results: &HashMap<Uuid, bool>,
        now: DateTime<Utc>,
    ) -> Vec<AlertRule> {
        let mut rising = Vec::new();

        for rule in self.rules.iter_mut() {
            let Some(&hit) = results.get(&rule.id) else {
                continue;
            };

            let was = rule.triggered;
            rule.triggered = hit;

            if hit && !was {
                rule.triggered_at = Some(now);
                rising.push(rule.clone());
            } else if !hit {
                rule.triggered_at = None;
            }
        }

        rising
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn clear(&mut self) {
        self.rules.clear();
    }
}
