use crate::orders::OrderStatus;

/// Central transition table for order statuses
pub struct StatusMachine;

impl StatusMachine {
    /// Statuses reachable from `from` in one step
    ///
    /// - Draft → Pending (flash completion only), Cancelled
    /// - Pending → Accepted, Cancelled
    /// - Accepted → PickedUp, Cancelled
    /// - PickedUp → InProgress → Ready → Delivering → Delivered
    /// - Delivered, Cancelled → (terminal)
    pub fn allowed_next(from: OrderStatus) -> &'static [OrderStatus] {
        match from {
            OrderStatus::Draft => &[OrderStatus::Pending, OrderStatus::Cancelled],
            OrderStatus::Pending => &[OrderStatus::Accepted, OrderStatus::Cancelled],
            OrderStatus::Accepted => &[OrderStatus::PickedUp, OrderStatus::Cancelled],
            OrderStatus::PickedUp => &[OrderStatus::InProgress],
            OrderStatus::InProgress => &[OrderStatus::Ready],
            OrderStatus::Ready => &[OrderStatus::Delivering],
            OrderStatus::Delivering => &[OrderStatus::Delivered],
            OrderStatus::Delivered | OrderStatus::Cancelled => &[],
        }
    }

    /// Check if a status transition is valid; self-transitions never are
    pub fn is_valid_transition(from: OrderStatus, to: OrderStatus) -> bool {
        Self::allowed_next(from).contains(&to)
    }

    /// Attempt to transition from one status to another
    pub fn transition(from: OrderStatus, to: OrderStatus) -> Result<OrderStatus, String> {
        if Self::is_valid_transition(from, to) {
            Ok(to)
        } else {
            Err(format!("Invalid status transition from {} to {}", from, to))
        }
    }

    /// Transition requested through the status endpoint
    ///
    /// DRAFT orders only leave for PENDING through flash completion.
    pub fn manual_transition(from: OrderStatus, to: OrderStatus) -> Result<OrderStatus, String> {
        if to == OrderStatus::Draft {
            return Err("Orders cannot be moved back to DRAFT".to_string());
        }
        if from == OrderStatus::Draft && to == OrderStatus::Pending {
            return Err("Draft orders become PENDING only by completing the flash order".to_string());
        }
        Self::transition(from, to)
    }

    /// Message for a transition lost to a concurrent status change
    pub fn stale_status(expected: OrderStatus, to: OrderStatus) -> String {
        format!(
            "Order is no longer {}; it was changed concurrently and cannot move to {}",
            expected, to
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EDGES: [(OrderStatus, OrderStatus); 10] = [
        (OrderStatus::Draft, OrderStatus::Pending),
        (OrderStatus::Draft, OrderStatus::Cancelled),
        (OrderStatus::Pending, OrderStatus::Accepted),
        (OrderStatus::Pending, OrderStatus::Cancelled),
        (OrderStatus::Accepted, OrderStatus::PickedUp),
        (OrderStatus::Accepted, OrderStatus::Cancelled),
        (OrderStatus::PickedUp, OrderStatus::InProgress),
        (OrderStatus::InProgress, OrderStatus::Ready),
        (OrderStatus::Ready, OrderStatus::Delivering),
        (OrderStatus::Delivering, OrderStatus::Delivered),
    ];

    #[test]
    fn test_every_table_edge_is_accepted() {
        for (from, to) in EDGES {
            assert!(StatusMachine::is_valid_transition(from, to), "{} -> {}", from, to);
        }
    }

    #[test]
    fn test_everything_else_is_rejected() {
        for from in OrderStatus::ALL {
            for to in OrderStatus::ALL {
                let expected = EDGES.contains(&(from, to));
                assert_eq!(StatusMachine::is_valid_transition(from, to), expected, "{} -> {}", from, to);
            }
        }
    }

    #[test]
    fn test_pending_to_delivered_is_rejected() {
        let err = StatusMachine::transition(OrderStatus::Pending, OrderStatus::Delivered).unwrap_err();
        assert_eq!(err, "Invalid status transition from PENDING to DELIVERED");
    }

    #[test]
    fn test_cannot_cancel_after_pickup() {
        assert!(!StatusMachine::is_valid_transition(OrderStatus::PickedUp, OrderStatus::Cancelled));
        assert!(!StatusMachine::is_valid_transition(OrderStatus::Delivering, OrderStatus::Cancelled));
    }

    #[test]
    fn test_same_status_is_rejected() {
        assert!(StatusMachine::transition(OrderStatus::Pending, OrderStatus::Pending).is_err());
    }

    #[test]
    fn test_manual_draft_to_pending_is_refused() {
        assert!(StatusMachine::manual_transition(OrderStatus::Draft, OrderStatus::Pending).is_err());
        assert_eq!(
            StatusMachine::manual_transition(OrderStatus::Draft, OrderStatus::Cancelled),
            Ok(OrderStatus::Cancelled)
        );
    }

    #[test]
    fn test_manual_transition_follows_table() {
        assert_eq!(
            StatusMachine::manual_transition(OrderStatus::Ready, OrderStatus::Delivering),
            Ok(OrderStatus::Delivering)
        );
        assert!(StatusMachine::manual_transition(OrderStatus::Ready, OrderStatus::Delivered).is_err());
    }

    #[test]
    fn test_lost_race_is_a_bad_request() {
        use crate::orders::OrderError;
        use axum::{http::StatusCode, response::IntoResponse};

        // Both callers pass the table check; the second guarded UPDATE finds no DELIVERING row
        assert!(StatusMachine::manual_transition(OrderStatus::Delivering, OrderStatus::Delivered).is_ok());
        let msg = StatusMachine::stale_status(OrderStatus::Delivering, OrderStatus::Delivered);
        assert!(msg.contains("DELIVERING"));
        assert!(msg.contains("DELIVERED"));

        let response = OrderError::InvalidTransition(msg).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn order_status_strategy() -> impl Strategy<Value = OrderStatus> {
        prop_oneof![
            Just(OrderStatus::Draft),
            Just(OrderStatus::Pending),
            Just(OrderStatus::Accepted),
            Just(OrderStatus::PickedUp),
            Just(OrderStatus::InProgress),
            Just(OrderStatus::Ready),
            Just(OrderStatus::Delivering),
            Just(OrderStatus::Delivered),
            Just(OrderStatus::Cancelled),
        ]
    }

    /// Property 1: terminal states have no exits
    #[test]
    fn prop_terminal_states_have_no_exits() {
        proptest!(|(to in order_status_strategy())| {
            prop_assert!(!StatusMachine::is_valid_transition(OrderStatus::Delivered, to));
            prop_assert!(!StatusMachine::is_valid_transition(OrderStatus::Cancelled, to));
        });
    }

    /// Property 2: DRAFT is never the target of a status update
    #[test]
    fn prop_draft_is_never_a_manual_target() {
        proptest!(|(from in order_status_strategy())| {
            prop_assert!(StatusMachine::manual_transition(from, OrderStatus::Draft).is_err());
        });
    }

    /// Property 3: self-transitions are rejected
    #[test]
    fn prop_self_transitions_rejected() {
        proptest!(|(status in order_status_strategy())| {
            prop_assert!(!StatusMachine::is_valid_transition(status, status));
        });
    }

    /// Property 4: transition agrees with is_valid_transition
    #[test]
    fn prop_transition_consistency() {
        proptest!(|(from in order_status_strategy(), to in order_status_strategy())| {
            let valid = StatusMachine::is_valid_transition(from, to);
            match StatusMachine::transition(from, to) {
                Ok(next) => {
                    prop_assert!(valid);
                    prop_assert_eq!(next, to);
                }
                Err(_) => prop_assert!(!valid),
            }
        });
    }
}
