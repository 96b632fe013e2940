//! The process-wide trailing-slash flag. Kept in its own test binary so no
//! other test observes the flag while it is set.

use std::sync::Arc;

use autoroute::{attach_controller, embed_controller, set_append_trailing_slash, Context, Controller, MethodSet};
use autoroute::routing::{append_trailing_slash, RouteTable};
use axum::http::StatusCode;

struct ControllerSlash;

impl Controller for ControllerSlash {
    fn methods() -> MethodSet<Self> {
        MethodSet::<Self>::new()
            .handler("Get", |_, ctx: &mut Context| ctx.status(StatusCode::OK))
            .handler("GetThing", |_, ctx: &mut Context| ctx.status(StatusCode::OK))
            .handler("ActionPing", |_, ctx: &mut Context| ctx.status(StatusCode::OK))
    }
}

fn paths(table: &RouteTable) -> Vec<String> {
    table.summaries().into_iter().map(|s| s.path).collect()
}

#[test]
fn test_global_flag_applies_to_free_functions() {
    assert!(!append_trailing_slash());

    let mut table = RouteTable::new();
    attach_controller(&mut table, Arc::new(ControllerSlash)).unwrap();
    assert_eq!(paths(&table), vec!["/slash/ping", "/slash/", "/slash/thing"]);

    set_append_trailing_slash(true);
    assert!(append_trailing_slash());

    let mut table = RouteTable::new();
    attach_controller(&mut table, Arc::new(ControllerSlash)).unwrap();
    assert_eq!(paths(&table), vec!["/slash/ping/", "/slash/", "/slash/thing/"]);

    let mut table = RouteTable::new();
    embed_controller(&mut table, Arc::new(ControllerSlash)).unwrap();
    assert_eq!(paths(&table), vec!["/ping/", "/", "/thing/"]);

    set_append_trailing_slash(false);
}
