//! # Concurrency Tests
//!
//! Many transactions race on a multi-threaded runtime against the same
//! documents. Whatever interleaving the scheduler picks, the committed state
//! must match some serial order of the successful operations.

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use ath_01_catalog::default_catalog;
    use ath_02_progress::{
        ChestStatus, ChestType, ConflictInjectingStore, DocPath, DocumentStore, DonationPayload,
        EngineConfig, FixedSeedSource, InMemoryDocumentStore, MockTimeSource, ProgressApi,
        ProgressError, ProgressService,
    };
    use futures::future::join_all;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use shared_types::{Currency, PlayerId};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn engine_config(max_transaction_attempts: u32) -> EngineConfig {
        EngineConfig {
            max_transaction_attempts,
            ..EngineConfig::default()
        }
    }

    fn service_over<S: DocumentStore + 'static>(
        store: Arc<S>,
        config: EngineConfig,
        clock: Arc<MockTimeSource>,
    ) -> Arc<ProgressService<S>> {
        Arc::new(
            ProgressService::new(store, Arc::new(default_catalog().unwrap()), config)
                .with_time_source(clock)
                .with_seed_source(Arc::new(FixedSeedSource::new(7))),
        )
    }

    fn id(raw: &str) -> PlayerId {
        PlayerId::new(raw).unwrap()
    }

    // =============================================================================
    // CONSERVATION
    // =============================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_donations_conserve_currency() {
        let service = service_over(
            Arc::new(InMemoryDocumentStore::new()),
            engine_config(1_000),
            Arc::new(MockTimeSource::new(0)),
        );
        let players: Vec<PlayerId> = (0..6).map(|i| id(&format!("stoa-{i}"))).collect();
        for player in &players {
            service.sync_progress(player).await.unwrap();
        }

        let mut rng = StdRng::seed_from_u64(42);
        let transfers: Vec<(usize, usize, u64)> = (0..80)
            .map(|_| {
                let from = rng.gen_range(0..players.len());
                let to = (from + rng.gen_range(1..players.len())) % players.len();
                (from, to, rng.gen_range(1..=40))
            })
            .collect();

        let handles = transfers.iter().map(|&(from, to, amount)| {
            let service = service.clone();
            let sender = players[from].clone();
            let receiver = players[to].clone();
            tokio::spawn(async move {
                service
                    .donate(
                        &sender,
                        &receiver,
                        DonationPayload::Currency {
                            currency: Currency::Scrolls,
                            amount,
                        },
                    )
                    .await
            })
        });
        let outcomes = join_all(handles).await;

        let mut expected: BTreeMap<usize, i64> = (0..players.len()).map(|i| (i, 100)).collect();
        for (outcome, &(from, to, amount)) in outcomes.into_iter().zip(&transfers) {
            match outcome.unwrap() {
                Ok(()) => {
                    *expected.entry(from).or_default() -= amount as i64;
                    *expected.entry(to).or_default() += amount as i64;
                }
                Err(ProgressError::InsufficientFunds { .. }) => {}
                Err(other) => panic!("unexpected donation failure: {other}"),
            }
        }

        let mut total = 0;
        for (index, player) in players.iter().enumerate() {
            let balance = service
                .get_progress(player)
                .await
                .unwrap()
                .unwrap()
                .balance(Currency::Scrolls);
            assert_eq!(balance as i64, expected[&index], "balance of {player}");
            total += balance;
        }
        assert_eq!(total, 100 * players.len() as u64);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_purchases_never_overdraw() {
        let service = service_over(
            Arc::new(InMemoryDocumentStore::new()),
            engine_config(1_000),
            Arc::new(MockTimeSource::new(0)),
        );
        let buyer = id("thrasymachus");
        service.sync_progress(&buyer).await.unwrap();

        // 100 starting scrolls cover none of the 250-scroll packs; top up for exactly three.
        let mut progress = service.get_progress(&buyer).await.unwrap().unwrap();
        progress.currencies.insert(Currency::Scrolls, 750);
        service.store().put(
            DocPath::Player(buyer.clone()),
            serde_json::to_value(&progress).unwrap(),
        );

        let handles = (0..10).map(|_| {
            let service = service.clone();
            let buyer = buyer.clone();
            tokio::spawn(async move {
                service
                    .buy_item(&buyer, ath_01_catalog::ItemKind::Currency, "books-small")
                    .await
            })
        });
        let succeeded = join_all(handles)
            .await
            .into_iter()
            .map(|joined| joined.unwrap())
            .filter(|outcome| outcome.is_ok())
            .count();

        assert_eq!(succeeded, 3);
        let after = service.get_progress(&buyer).await.unwrap().unwrap();
        assert_eq!(after.balance(Currency::Scrolls), 0);
        assert_eq!(after.balance(Currency::Books), 5 + 3 * 20);
    }

    // =============================================================================
    // CHEST INVARIANTS
    // =============================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_unlocks_leave_single_unlocking_chest() {
        let service = service_over(
            Arc::new(InMemoryDocumentStore::new()),
            engine_config(1_000),
            Arc::new(MockTimeSource::new(0)),
        );
        let player = id("heraclitus");
        service.sync_progress(&player).await.unwrap();
        for chest_type in ChestType::ALL {
            service.award_chest(&player, chest_type).await.unwrap();
        }

        let handles = (0..4).map(|slot| {
            let service = service.clone();
            let player = player.clone();
            tokio::spawn(async move { service.unlock_chest(&player, slot).await })
        });
        let outcomes: Vec<_> = join_all(handles)
            .await
            .into_iter()
            .map(|joined| joined.unwrap())
            .collect();

        assert_eq!(outcomes.iter().filter(|o| o.is_ok()).count(), 1);
        assert!(outcomes.iter().all(|o| matches!(
            o,
            Ok(()) | Err(ProgressError::AnotherChestUnlocking { .. })
        )));

        let progress = service.get_progress(&player).await.unwrap().unwrap();
        let unlocking = progress
            .chest_slots
            .iter()
            .flatten()
            .filter(|c| c.status == ChestStatus::Unlocking)
            .count();
        assert_eq!(unlocking, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_opens_credit_rewards_once() {
        let clock = Arc::new(MockTimeSource::new(0));
        let service = service_over(
            Arc::new(InMemoryDocumentStore::new()),
            engine_config(1_000),
            clock.clone(),
        );
        let player = id("parmenides");
        service.sync_progress(&player).await.unwrap();
        service.award_chest(&player, ChestType::Lendario).await.unwrap();
        service.unlock_chest(&player, 0).await.unwrap();
        clock.set(ChestType::Lendario.unlock_duration_secs());

        let handles = (0..5).map(|_| {
            let service = service.clone();
            let player = player.clone();
            tokio::spawn(async move { service.open_chest(&player, 0).await })
        });
        let outcomes: Vec<_> = join_all(handles)
            .await
            .into_iter()
            .map(|joined| joined.unwrap())
            .collect();

        assert_eq!(outcomes.iter().filter(|o| o.is_ok()).count(), 1);
        assert!(outcomes.iter().all(|o| matches!(
            o,
            Ok(_) | Err(ProgressError::NoChestAtIndex { index: 0 })
        )));

        let progress = service.get_progress(&player).await.unwrap().unwrap();
        assert_eq!(progress.balance(Currency::Scrolls), 100 + 100);
        assert_eq!(progress.balance(Currency::Books), 5 + 10);
        assert!(progress.chest_slots[0].is_none());
    }

    // =============================================================================
    // GUILDS
    // =============================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_joins_are_all_recorded() {
        let service = service_over(
            Arc::new(InMemoryDocumentStore::new()),
            engine_config(1_000),
            Arc::new(MockTimeSource::new(0)),
        );
        let leader = id("pythagoras");
        service.sync_progress(&leader).await.unwrap();
        let guild = service
            .create_guild(&leader, "Brotherhood", "Numbers and beans")
            .await
            .unwrap();

        let members: Vec<PlayerId> = (0..8).map(|i| id(&format!("acolyte-{i}"))).collect();
        for member in &members {
            service.sync_progress(member).await.unwrap();
        }

        let handles = members.iter().cloned().map(|member| {
            let service = service.clone();
            tokio::spawn(async move { service.join_guild(&member, guild.id).await })
        });
        for joined in join_all(handles).await {
            joined.unwrap().unwrap();
        }

        let stored = service.get_guild(guild.id).await.unwrap().unwrap();
        assert_eq!(stored.members.len(), 9);
        for member in &members {
            assert!(stored.members.contains(member));
            let progress = service.get_progress(member).await.unwrap().unwrap();
            assert_eq!(progress.guild_id, Some(guild.id));
        }
    }

    // =============================================================================
    // CONTENTION
    // =============================================================================

    #[tokio::test]
    async fn test_exhausted_retries_report_contention_without_writes() {
        let store = Arc::new(ConflictInjectingStore::new(InMemoryDocumentStore::new(), 0));
        let service = service_over(store.clone(), engine_config(3), Arc::new(MockTimeSource::new(0)));
        let player = id("gorgias");
        service.sync_progress(&player).await.unwrap();
        let before = service.get_progress(&player).await.unwrap();

        store.arm(10);
        let err = service
            .award_chest(&player, ChestType::Tomo)
            .await
            .unwrap_err();

        assert_eq!(err, ProgressError::Contention { attempts: 3 });
        assert_eq!(service.get_progress(&player).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_transient_conflicts_are_retried_transparently() {
        let store = Arc::new(ConflictInjectingStore::new(InMemoryDocumentStore::new(), 0));
        let service = service_over(store.clone(), engine_config(5), Arc::new(MockTimeSource::new(0)));
        let player = id("protagoras");
        service.sync_progress(&player).await.unwrap();

        store.arm(4);
        let progress = service.add_trophies(&player, 450).await.unwrap();

        assert_eq!(progress.trophies, 450);
        assert_eq!(progress.current_arena_id, 1);
        assert_eq!(
            service.get_progress(&player).await.unwrap().unwrap().trophies,
            450
        );
    }
}
