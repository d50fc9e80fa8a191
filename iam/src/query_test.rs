use super::*;
use crate::mock;

// =============================================================
// Filtering
// =============================================================

#[test]
fn audit_risk_filter_yields_exactly_matching_entries() {
    let logs = mock::audit_logs();
    assert_eq!(logs.len(), 5);

    let filter = AuditFilter {
        risk: Some(RiskLevel::Medium),
        ..AuditFilter::default()
    };
    let hits = filter_items(&logs, &filter);
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|l| l.risk == RiskLevel::Medium));
}

#[test]
fn inactive_filter_keeps_everything_in_order() {
    let users = mock::users();
    let filter = UserFilter::default();
    assert!(!filter.is_active());
    assert_eq!(filter_items(&users, &filter), users);
}

#[test]
fn whitespace_search_is_inactive() {
    let filter = UserFilter {
        search: "   ".to_owned(),
        ..UserFilter::default()
    };
    assert!(!filter.is_active());
    assert_eq!(filter_items(&mock::users(), &filter).len(), mock::users().len());
}

#[test]
fn user_search_is_case_insensitive_across_fields() {
    let users = mock::users();
    let by_email = UserFilter {
        search: "ALICE@".to_owned(),
        ..UserFilter::default()
    };
    let hits = filter_items(&users, &by_email);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].username, "alice");

    let by_full_name = UserFilter {
        search: "bob martin".to_owned(),
        ..UserFilter::default()
    };
    assert_eq!(filter_items(&users, &by_full_name).len(), 1);
}

#[test]
fn user_filters_combine_with_and_semantics() {
    let users = mock::users();
    let filter = UserFilter {
        search: String::new(),
        status: Some(UserStatus::Active),
        role: Some("role-admin".to_owned()),
        department: None,
    };
    let hits = filter_items(&users, &filter);
    assert!(!hits.is_empty());
    for user in &users {
        let expected = user.status == UserStatus::Active && user.has_role("role-admin");
        assert_eq!(hits.contains(user), expected, "user {}", user.id);
    }
}

#[test]
fn every_permission_filter_combination_is_exact_subset() {
    let perms = mock::permissions();
    let categories = [None, Some("cat-users".to_owned()), Some("cat-security".to_owned())];
    let scopes = [None, Some(PermissionScope::Global), Some(PermissionScope::Team)];
    let risks = [None, Some(RiskLevel::Low), Some(RiskLevel::High), Some(RiskLevel::Critical)];
    let searches = ["", "read", "delete"];

    for category in &categories {
        for scope in &scopes {
            for risk in &risks {
                for search in searches {
                    let filter = PermissionFilter {
                        search: search.to_owned(),
                        category: category.clone(),
                        scope: *scope,
                        risk: *risk,
                    };
                    let hits = filter_items(&perms, &filter);
                    let expected = perms
                        .iter()
                        .filter(|p| {
                            let text = format!("{} {} {} {}", p.name, p.description, p.resource, p.action)
                                .to_lowercase();
                            text.contains(search)
                                && category.as_ref().is_none_or(|c| &p.category == c)
                                && scope.is_none_or(|s| p.scope == s)
                                && risk.is_none_or(|r| p.risk == r)
                        })
                        .cloned()
                        .collect::<Vec<_>>();
                    assert_eq!(hits, expected);
                }
            }
        }
    }
}

#[test]
fn role_kind_filter_splits_system_and_custom() {
    let roles = mock::roles();
    let system = filter_items(
        &roles,
        &RoleFilter {
            kind: Some(RoleKind::System),
            ..RoleFilter::default()
        },
    );
    let custom = filter_items(
        &roles,
        &RoleFilter {
            kind: Some(RoleKind::Custom),
            ..RoleFilter::default()
        },
    );
    assert_eq!(system.len() + custom.len(), roles.len());
    assert!(system.iter().all(|r| r.is_system));
    assert!(custom.iter().all(|r| !r.is_system));
}

#[test]
fn role_kind_parses_its_wire_name() {
    assert_eq!(RoleKind::parse("system"), Some(RoleKind::System));
    assert_eq!(RoleKind::parse(" custom "), Some(RoleKind::Custom));
    assert_eq!(RoleKind::parse(""), None);
}

#[test]
fn policy_search_covers_patterns() {
    let policies = mock::policies();
    let filter = PolicyFilter {
        search: "documents/".to_owned(),
        ..PolicyFilter::default()
    };
    let hits = filter_items(&policies, &filter);
    assert!(!hits.is_empty());
    assert!(hits.iter().all(|p| p.resources.iter().any(|r| r.contains("documents/"))));
}

#[test]
fn audit_window_uses_resolved_since() {
    let logs = mock::audit_logs();
    let now = mock::reference_time();

    let mut filter = AuditFilter::default();
    filter.set_window(TimeWindow::Last24Hours, now);
    assert_eq!(filter.since, Some(now - TimeDelta::hours(24)));
    let recent = filter_items(&logs, &filter);
    assert!(recent.iter().all(|l| l.timestamp >= now - TimeDelta::hours(24)));
    assert!(recent.len() < logs.len());

    filter.set_window(TimeWindow::All, now);
    assert_eq!(filter.since, None);
    assert_eq!(filter_items(&logs, &filter).len(), logs.len());
}

#[test]
fn time_window_parse_round_trips_and_defaults() {
    for window in TimeWindow::ALL {
        assert_eq!(TimeWindow::parse(window.as_str()), window);
    }
    assert_eq!(TimeWindow::parse("forever"), TimeWindow::All);
}

#[test]
fn report_filter_matches_framework_and_status() {
    let reports = mock::compliance_reports();
    let by_framework = ReportFilter {
        search: "iso".to_owned(),
        ..ReportFilter::default()
    };
    let hits = filter_items(&reports, &by_framework);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "rep-iso");

    let failing = ReportFilter {
        status: Some(ComplianceStatus::NonCompliant),
        ..ReportFilter::default()
    };
    assert!(failing.is_active());
    assert_eq!(filter_items(&reports, &failing)[0].id, "rep-sox");
}

#[test]
fn sort_newest_first_orders_by_timestamp_desc() {
    let mut logs = mock::audit_logs();
    logs.reverse();
    sort_newest_first(&mut logs);
    assert!(logs.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
}

#[test]
fn distinct_sorts_and_drops_blanks() {
    let values = distinct(["eng", " ops ", "", "eng", "finance"]);
    assert_eq!(values, vec!["eng", "finance", "ops"]);
}

// =============================================================
// Pagination
// =============================================================

#[test]
fn total_pages_is_at_least_one() {
    let pager = Pager::new(10);
    assert_eq!(pager.total_pages(0), 1);
    assert_eq!(pager.total_pages(10), 1);
    assert_eq!(pager.total_pages(11), 2);
}

#[test]
fn zero_page_size_is_coerced_or_rejected() {
    assert_eq!(Pager::new(0).page_size(), 1);
    let mut pager = Pager::new(25);
    assert!(!pager.set_page_size(0));
    assert_eq!(pager.page_size(), 25);
}

#[test]
fn changing_page_size_resets_to_first_page() {
    let mut pager = Pager::new(10);
    pager.go_to(3, 100);
    assert_eq!(pager.page(), 3);
    assert!(pager.set_page_size(25));
    assert_eq!(pager.page(), 1);
    assert_eq!(pager.page_size(), 25);
}

#[test]
fn navigating_past_last_page_is_clamped() {
    let mut pager = Pager::new(10);
    pager.go_to(3, 25);
    assert_eq!(pager.page(), 3);
    pager.next(25);
    assert_eq!(pager.page(), 3);
    pager.go_to(99, 25);
    assert_eq!(pager.page(), 3);
    pager.go_to(0, 25);
    assert_eq!(pager.page(), 1);
    pager.prev();
    assert_eq!(pager.page(), 1);
}

#[test]
fn displayed_slice_never_exceeds_list_length() {
    for total in 0..40usize {
        let items = (0..total).collect::<Vec<_>>();
        for size in [1usize, 3, 10, 25] {
            let mut pager = Pager::new(size);
            for page in 1..=pager.total_pages(total) {
                pager.go_to(page, total);
                let range = pager.range(total);
                assert!(range.end <= total);
                assert!(range.start <= range.end);
                assert!(range.len() <= size);
                assert_eq!(pager.slice(&items).len(), range.len());
            }
        }
    }
}

#[test]
fn pages_partition_the_list() {
    let items = (0..23).collect::<Vec<_>>();
    let mut pager = Pager::new(10);
    let mut seen = Vec::new();
    for page in 1..=pager.total_pages(items.len()) {
        pager.go_to(page, items.len());
        seen.extend_from_slice(pager.slice(&items));
    }
    assert_eq!(seen, items);
}

#[test]
fn paginate_clamps_stale_page_after_shrink() {
    let mut pager = Pager::new(10);
    pager.go_to(5, 50);
    let items = (0..12).collect::<Vec<_>>();
    let page = paginate(&items, &pager);
    assert_eq!(page.page, 2);
    assert_eq!(page.items, vec![10, 11]);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.summary(), "Showing 11-12 of 12");
}

#[test]
fn empty_page_summary() {
    let page = paginate::<u32>(&[], &Pager::default());
    assert_eq!(page.first_index(), 0);
    assert_eq!(page.last_index(), 0);
    assert_eq!(page.summary(), "Showing 0-0 of 0");
    assert_eq!(page.page_size, DEFAULT_PAGE_SIZE);
}

#[test]
fn has_prev_and_next_track_position() {
    let mut pager = Pager::new(10);
    assert!(!pager.has_prev());
    assert!(pager.has_next(15));
    pager.next(15);
    assert!(pager.has_prev());
    assert!(!pager.has_next(15));
}
