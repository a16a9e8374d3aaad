#[cfg(test)]
mod tests {
    use parking_lot::Mutex;
    use std::sync::Arc;
    use taskboard::libs::comms::{Comms, Event, Request, RequestKind, Response, Topic};

    #[test]
    fn test_events_published_before_subscribe_are_replayed() {
        let comms = Comms::new();
        comms.publish(Event::AddProject("A".to_string()));
        comms.publish(Event::AddProject("B".to_string()));
        comms.publish(Event::AddProject("C".to_string()));

        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&received);
        comms.subscribe(Topic::AddProject, move |event| {
            if let Event::AddProject(name) = event {
                sink.lock().push(name.clone());
            }
        });

        // Replay happens before subscribe returns.
        assert_eq!(*received.lock(), vec!["A", "B", "C"]);

        comms.publish(Event::AddProject("D".to_string()));
        assert_eq!(received.lock().len(), 4);
        assert_eq!(comms.backlog_len(Topic::AddProject), 0);
    }

    #[test]
    fn test_second_responder_is_rejected() {
        let comms = Comms::new();
        let first = comms.register_responder(RequestKind::ProjectNames, |_| {
            Some(Response::ProjectNames(vec!["first".to_string()]))
        });
        let second = comms.register_responder(RequestKind::ProjectNames, |_| {
            Some(Response::ProjectNames(vec!["second".to_string()]))
        });

        assert!(first);
        assert!(!second);
        let names = comms.request(&Request::ProjectNames).and_then(Response::into_project_names);
        assert_eq!(names, Some(vec!["first".to_string()]));
    }

    #[test]
    fn test_responder_may_decline() {
        let comms = Comms::new();
        comms.register_responder(RequestKind::TasksForProject, |request| match request {
            Request::TasksForProject(name) if name == "Known" => Some(Response::Tasks(Vec::new())),
            _ => None,
        });

        assert!(comms.request(&Request::TasksForProject("Known".to_string())).is_some());
        assert!(comms.request(&Request::TasksForProject("Other".to_string())).is_none());
    }

    #[test]
    fn test_handlers_see_same_payload() {
        let comms = Comms::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for _ in 0..2 {
            let seen = Arc::clone(&seen);
            comms.subscribe(Topic::RenderProjects, move |event| seen.lock().push(event.clone()));
        }
        let event = Event::RenderProjects(vec!["Work".to_string()]);
        comms.publish(event.clone());

        assert_eq!(*seen.lock(), vec![event.clone(), event]);
    }
}
