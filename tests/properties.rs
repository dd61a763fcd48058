use chrono::DateTime;
use followback::{analyze, rank, RelationshipCollection, SortDirection, SortToggle, User};
use proptest::prelude::*;
use std::collections::HashSet;

fn user_strategy() -> impl Strategy<Value = User> {
    ("[a-e]{1,2}", 0i64..2_000_000_000).prop_map(|(name, secs)| User {
        profile_url: format!("https://www.instagram.com/{}", name),
        username: name,
        followed_at: DateTime::from_timestamp(secs, 0).unwrap(),
    })
}

fn collection_strategy() -> impl Strategy<Value = RelationshipCollection> {
    prop::collection::vec(user_strategy(), 0..20).prop_map(|users| users.into_iter().collect())
}

fn usernames<'a>(users: impl IntoIterator<Item = &'a User>) -> HashSet<&'a str> {
    users.into_iter().map(|u| u.username.as_str()).collect()
}

proptest! {
    #[test]
    fn prop_following_is_partitioned(followers in collection_strategy(), following in collection_strategy()) {
        let result = analyze(followers.clone(), following.clone());

        let not_back = usernames(&result.not_following_back);
        let mutual = usernames(&result.mutual_follows);

        prop_assert!(not_back.is_disjoint(&mutual));
        prop_assert_eq!(result.not_following_back.len() + result.mutual_follows.len(), following.len());
        let union: HashSet<&str> = not_back.union(&mutual).copied().collect();
        prop_assert_eq!(union, usernames(&following));

        for user in &result.mutual_follows {
            prop_assert!(followers.contains(&user.username));
        }
        for user in &result.not_following_back {
            prop_assert!(!followers.contains(&user.username));
        }
    }

    #[test]
    fn prop_not_followed_back_is_followers_minus_following(
        followers in collection_strategy(),
        following in collection_strategy(),
    ) {
        let result = analyze(followers.clone(), following.clone());

        let expected: Vec<&User> = followers
            .iter()
            .filter(|u| !following.contains(&u.username))
            .collect();
        let actual: Vec<&User> = result.not_followed_back.iter().collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_analyze_is_idempotent(followers in collection_strategy(), following in collection_strategy()) {
        let first = analyze(followers.clone(), following.clone());
        let second = analyze(followers, following);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_desc_reverses_asc_without_ties(secs in prop::collection::hash_set(0i64..2_000_000_000, 0..30)) {
        let users: Vec<User> = secs
            .into_iter()
            .enumerate()
            .map(|(i, s)| User {
                username: format!("user{}", i),
                profile_url: format!("https://www.instagram.com/user{}", i),
                followed_at: DateTime::from_timestamp(s, 0).unwrap(),
            })
            .collect();

        let asc = rank(&users, Some(SortDirection::Asc));
        let mut desc = rank(&asc, Some(SortDirection::Desc));
        desc.reverse();
        prop_assert_eq!(desc, asc);
    }

    #[test]
    fn prop_rank_is_stable(users in prop::collection::vec(user_strategy(), 0..30)) {
        for direction in [SortDirection::Asc, SortDirection::Desc] {
            let ranked = rank(&users, Some(direction));
            prop_assert_eq!(ranked.len(), users.len());

            for pair in ranked.windows(2) {
                if pair[0].followed_at == pair[1].followed_at {
                    let first = users.iter().position(|u| u == &pair[0]).unwrap();
                    let last = users.iter().rposition(|u| u == &pair[1]).unwrap();
                    prop_assert!(first <= last);
                }
            }
        }
    }

    #[test]
    fn prop_toggle_alternates_after_first_activation(clicks in 1usize..20) {
        let mut toggle = SortToggle::new();
        for _ in 0..clicks {
            toggle.activate();
        }
        let expected = if clicks % 2 == 1 { SortDirection::Asc } else { SortDirection::Desc };
        prop_assert_eq!(toggle.direction(), Some(expected));
    }
}
