//! # Integration Tests
//!
//! End-to-end tests across crates.
//!
//! Covers:
//! - Contract smoke tests
//! - Route file -> loader -> registries -> dispatcher
//! - File and socket delivery
//! - Delivery policies

#[cfg(test)]
mod contract_tests {
    #[test]
    fn test_contracts_compile() {
        let _ = contracts::ConfigVersion::V1;
        let _ = contracts::DeliveryPolicy::default();
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::collections::HashMap;
    use std::io::{BufRead, BufReader};
    use std::net::TcpListener;

    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{ContractError, Message, RouteBlueprint};
    use dispatcher::{
        build_dispatcher, create_dispatcher, Dispatcher, DispatcherError, FilterRegistry,
        HandlerRegistry, MemoryHandler, Verdict,
    };
    use observability::{DispatchOutcome, DispatchStatsAggregator};

    /// Built-in registries plus a `memory` kind backed by the given handlers
    fn registries_with_memory(
        captures: &[&MemoryHandler],
        names: &[&str],
    ) -> (FilterRegistry, HandlerRegistry) {
        let by_name: HashMap<String, MemoryHandler> = names
            .iter()
            .zip(captures)
            .map(|(name, capture)| (name.to_string(), (*capture).clone()))
            .collect();

        let mut handlers = HandlerRegistry::builtin();
        handlers.register("memory", move |config| {
            let capture = by_name.get(&config.name).cloned().ok_or_else(|| {
                let message = format!("no capture for {}", config.name);
                ContractError::config_validation("handlers", message)
            })?;
            Ok(Box::new(capture))
        });

        (FilterRegistry::builtin(), handlers)
    }

    fn load(toml: &str) -> RouteBlueprint {
        ConfigLoader::load_from_str(toml, ConfigFormat::Toml)
            .unwrap()
            .blueprint
    }

    /// End-to-end: TOML route -> ConfigLoader -> registries -> Dispatcher
    #[test]
    fn test_e2e_route_file_scenarios() {
        let blueprint = load(
            r#"
            version = "V1"

            [[filters]]
            kind = "text"
            params = { pattern = "Error" }

            [[handlers]]
            name = "first"
            kind = "memory"

            [[handlers]]
            name = "second"
            kind = "memory"
            "#,
        );

        let first = MemoryHandler::new("first");
        let second = MemoryHandler::new("second");
        let (filters, handlers) = registries_with_memory(&[&first, &second], &["first", "second"]);
        let dispatcher = build_dispatcher(&blueprint, &filters, &handlers).unwrap();

        assert_eq!(dispatcher.handler_names(), vec!["first", "second"]);

        // Rejected: no handler sees it
        dispatcher
            .dispatch(&Message::from("Ignored: this will not be logged"))
            .unwrap();
        assert!(first.is_empty());
        assert!(second.is_empty());

        // Accepted: every handler sees it exactly once
        dispatcher
            .dispatch(&Message::from("Error: this is important"))
            .unwrap();
        assert_eq!(first.texts(), vec!["Error: this is important"]);
        assert_eq!(second.texts(), vec!["Error: this is important"]);

        let snapshot = dispatcher.metrics();
        assert_eq!(snapshot.accepted, 1);
        assert_eq!(snapshot.rejected, 1);
        assert_eq!(snapshot.delivered, 2);
    }

    /// Filters combine by conjunction, regardless of which kinds they are
    #[test]
    fn test_e2e_filter_conjunction() {
        let blueprint = load(
            r#"
            [[filters]]
            kind = "severity"
            params = { min = "warning" }

            [[filters]]
            kind = "regex"
            name = "disk"
            params = { pattern = "disk\\s+(full|failing)" }

            [[handlers]]
            name = "capture"
            kind = "memory"
            "#,
        );

        let capture = MemoryHandler::new("capture");
        let (filters, handlers) = registries_with_memory(&[&capture], &["capture"]);
        let dispatcher = build_dispatcher(&blueprint, &filters, &handlers).unwrap();

        let cases = [
            ("Error: disk full", Verdict::Accepted),
            ("Info: disk full", Verdict::Rejected),
            ("Critical: network down", Verdict::Rejected),
            ("Warning: disk failing", Verdict::Accepted),
            ("disk full", Verdict::Rejected),
        ];
        for (text, expected) in cases {
            let verdict = dispatcher.route(&Message::from(text)).unwrap();
            assert_eq!(verdict, expected, "{}", text);
        }

        assert_eq!(capture.texts(), vec!["Error: disk full", "Warning: disk failing"]);
    }

    /// File handler appends one line per accepted message
    #[test]
    fn test_e2e_file_handler() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("errors.log");

        let blueprint = load(&format!(
            r#"
            [[filters]]
            kind = "text"
            params = {{ pattern = "Error" }}

            [[handlers]]
            name = "errors"
            kind = "file"
            params = {{ path = '{}' }}
            "#,
            path.display()
        ));

        let dispatcher = create_dispatcher(&blueprint).unwrap();
        for text in ["Error: one", "Info: skipped", "Error: two"] {
            dispatcher.dispatch(&Message::from(text)).unwrap();
        }
        dispatcher.flush().unwrap();
        drop(dispatcher);

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "Error: one\nError: two\n");
    }

    /// Socket handler sends newline-terminated ASCII payloads
    #[test]
    fn test_e2e_socket_handler() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let blueprint = load(&format!(
            r#"
            [[handlers]]
            name = "net"
            kind = "socket"
            params = {{ addr = "{}", timeout_ms = "1000" }}
            "#,
            addr
        ));

        let dispatcher = create_dispatcher(&blueprint).unwrap();
        let (peer, _) = listener.accept().unwrap();

        dispatcher.dispatch(&Message::from("Error: sent")).unwrap();
        let err = dispatcher
            .dispatch(&Message::from("Error: caf\u{e9}"))
            .unwrap_err();
        assert_eq!(err.failed_handlers(), vec!["net"]);
        drop(dispatcher);

        let lines: Vec<String> = BufReader::new(peer).lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["Error: sent"]);
    }

    /// Best-effort delivery still reaches handlers after a failure
    #[test]
    fn test_e2e_best_effort_delivery() {
        let blueprint = load(
            r#"
            delivery = "best_effort"

            [[handlers]]
            name = "broken"
            kind = "memory"

            [[handlers]]
            name = "healthy"
            kind = "memory"
            "#,
        );

        let broken = MemoryHandler::new("broken");
        let healthy = MemoryHandler::new("healthy");
        broken.fail_with("disk unplugged");
        let (filters, handlers) =
            registries_with_memory(&[&broken, &healthy], &["broken", "healthy"]);
        let dispatcher = build_dispatcher(&blueprint, &filters, &handlers).unwrap();

        let err = dispatcher.dispatch(&Message::from("Error: x")).unwrap_err();
        assert!(matches!(err, DispatcherError::Delivery { .. }));
        assert_eq!(err.failed_handlers(), vec!["broken"]);
        assert_eq!(healthy.texts(), vec!["Error: x"]);
    }

    /// Default policy stops at the first failing handler
    #[test]
    fn test_e2e_stop_on_error_delivery() {
        let blueprint = load(
            r#"
            [[handlers]]
            name = "broken"
            kind = "memory"

            [[handlers]]
            name = "healthy"
            kind = "memory"
            "#,
        );

        let broken = MemoryHandler::new("broken");
        let healthy = MemoryHandler::new("healthy");
        broken.fail_with("disk unplugged");
        let (filters, handlers) =
            registries_with_memory(&[&broken, &healthy], &["broken", "healthy"]);
        let dispatcher = build_dispatcher(&blueprint, &filters, &handlers).unwrap();

        let err = dispatcher.dispatch(&Message::from("Error: x")).unwrap_err();
        assert!(matches!(err, DispatcherError::Handler { .. }));
        assert!(healthy.is_empty());
    }

    /// Unknown kinds surface when building, not when loading
    #[test]
    fn test_e2e_unknown_kind() {
        let blueprint = load(
            r#"
            [[handlers]]
            name = "queue"
            kind = "kafka"
            "#,
        );

        let err = create_dispatcher(&blueprint).err().unwrap();
        assert!(matches!(err, DispatcherError::UnknownKind { .. }));
    }

    /// Dispatcher outcomes feed the run summary
    #[test]
    fn test_e2e_stats_summary() {
        let capture = MemoryHandler::new("capture");
        let dispatcher = Dispatcher::builder()
            .filter(dispatcher::TextFilter::new("Error"))
            .handler(capture.clone())
            .build();
        let mut stats = DispatchStatsAggregator::new();

        for text in ["Error: a", "Info: b", "Error: c"] {
            let outcome = match dispatcher.route(&Message::from(text)).unwrap() {
                Verdict::Accepted => DispatchOutcome::Delivered,
                Verdict::Rejected => DispatchOutcome::Rejected,
            };
            stats.record(outcome, &[], 1.0);
        }

        let summary = stats.summary();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.accepted, 2);
        assert_eq!(summary.rejected, 1);
        assert_eq!(capture.len(), 2);
    }
}
