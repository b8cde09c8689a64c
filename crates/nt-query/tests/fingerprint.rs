//! Fingerprints follow the built query, not the whole parameter set.

use nt_query::{
    build_query, params_fingerprint, AccountId, Attribute, DataSource, QueryParams,
};
use proptest::prelude::*;

fn arb_params() -> impl Strategy<Value = QueryParams> {
    let grouping = prop::collection::vec(
        prop::sample::select(vec!["peerName", "bgpSourceAsNumber", "agent"]),
        0..=2,
    );
    (
        1u64..1_000,
        prop::sample::select(vec![DataSource::Sflow, DataSource::Ipfix]),
        grouping,
        prop::sample::select(vec![Attribute::Throughput, Attribute::Count]),
        1u32..=100,
        prop_oneof![Just(0u32), 3u32..=60],
        any::<bool>(),
    )
        .prop_map(
            |(account, source, grouping, attribute, limit, interval_seconds, hide_labels)| {
                QueryParams {
                    grouping: grouping.into_iter().map(String::from).collect(),
                    attribute,
                    limit,
                    interval_seconds,
                    hide_labels,
                    ..QueryParams::for_account(AccountId(account), source)
                }
            },
        )
}

proptest! {
    #[test]
    fn generated_params_validate(params in arb_params()) {
        prop_assert!(params.validate().is_ok());
    }

    #[test]
    fn query_and_fingerprint_are_deterministic(params in arb_params()) {
        let copy = params.clone();
        prop_assert_eq!(build_query(&params), build_query(&copy));
        prop_assert_eq!(params_fingerprint(&params), params_fingerprint(&copy));
    }

    #[test]
    fn hiding_labels_keeps_fingerprint(params in arb_params()) {
        let mut toggled = params.clone();
        toggled.hide_labels = !params.hide_labels;
        prop_assert_eq!(params_fingerprint(&params), params_fingerprint(&toggled));
    }

    #[test]
    fn limit_change_moves_fingerprint(params in arb_params(), limit in 1u32..=100) {
        prop_assume!(limit != params.limit);
        let mut next = params.clone();
        next.limit = limit;
        prop_assert_ne!(params_fingerprint(&params), params_fingerprint(&next));
    }

    #[test]
    fn account_change_moves_fingerprint(params in arb_params(), account in 1u64..1_000) {
        prop_assume!(Some(AccountId(account)) != params.account_id);
        let mut next = params.clone();
        next.account_id = Some(AccountId(account));
        prop_assert_ne!(params_fingerprint(&params), params_fingerprint(&next));
    }

    #[test]
    fn sflow_interval_is_not_part_of_query(params in arb_params(), interval in 3u32..=60) {
        prop_assume!(params.source == DataSource::Sflow);
        let mut next = params.clone();
        next.interval_seconds = interval;
        prop_assert_eq!(params_fingerprint(&params), params_fingerprint(&next));
    }

    #[test]
    fn ipfix_interval_sets_query_window(params in arb_params(), interval in 3u32..=60) {
        prop_assume!(params.source == DataSource::Ipfix);
        let mut next = params.clone();
        next.interval_seconds = interval;
        let window = format!(" SINCE {interval} seconds ago");
        prop_assert!(build_query(&next).contains(&window));
    }
}
