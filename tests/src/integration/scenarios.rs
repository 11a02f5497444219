//! # Scenario Tests
//!
//! End-to-end flows through `ProgressService` over the default catalog:
//!
//! 1. **Time gating**: an unlocking chest cannot be opened before its end time
//! 2. **Single unlock**: a second unlock is refused and nothing changes
//! 3. **Donation shortfall**: a failed donation mutates neither account
//! 4. **Shop shortfall**: a failed purchase grants nothing

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ath_01_catalog::{default_catalog, ItemKind};
    use ath_02_progress::{
        ChestStatus, ChestType, DocPath, DonationPayload, EngineConfig, ErrorKind,
        FixedSeedSource, InMemoryDocumentStore, MockTimeSource, PlayerProgress, ProgressApi,
        ProgressError, ProgressService,
    };
    use shared_types::{CardId, Currency, PlayerId};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    struct World {
        service: ProgressService<InMemoryDocumentStore>,
        clock: Arc<MockTimeSource>,
    }

    impl World {
        fn new() -> Self {
            let clock = Arc::new(MockTimeSource::new(0));
            let service = ProgressService::new(
                Arc::new(InMemoryDocumentStore::new()),
                Arc::new(default_catalog().unwrap()),
                EngineConfig::default(),
            )
            .with_time_source(clock.clone())
            .with_seed_source(Arc::new(FixedSeedSource::new(2024)));
            Self { service, clock }
        }

        async fn player(&self, raw: &str) -> PlayerId {
            let id = PlayerId::new(raw).unwrap();
            self.service.sync_progress(&id).await.unwrap();
            id
        }

        async fn progress(&self, id: &PlayerId) -> PlayerProgress {
            self.service.get_progress(id).await.unwrap().unwrap()
        }

        /// Overwrites a player's balance outside any transaction.
        async fn set_balance(&self, id: &PlayerId, currency: Currency, amount: u64) {
            let mut progress = self.progress(id).await;
            progress.currencies.insert(currency, amount);
            self.service.store().put(
                DocPath::Player(id.clone()),
                serde_json::to_value(&progress).unwrap(),
            );
        }
    }

    // =============================================================================
    // CHEST FLOWS
    // =============================================================================

    #[tokio::test]
    async fn test_papiro_opens_only_after_unlock_duration() {
        let world = World::new();
        let diogenes = world.player("diogenes").await;
        let slot = world
            .service
            .award_chest(&diogenes, ChestType::Papiro)
            .await
            .unwrap();
        assert_eq!(slot, 0);

        world.service.unlock_chest(&diogenes, 0).await.unwrap();
        let unlocking = world.progress(&diogenes).await;
        let chest = unlocking.chest_slots[0].clone().unwrap();
        assert_eq!(chest.status, ChestStatus::Unlocking);
        assert_eq!(chest.unlock_start_time, Some(0));
        assert_eq!(chest.unlock_end_time, Some(3_600));

        world.clock.set(1_000);
        let err = world.service.open_chest(&diogenes, 0).await.unwrap_err();
        assert!(matches!(err, ProgressError::ChestNotReady { index: 0, .. }));
        assert_eq!(world.progress(&diogenes).await, unlocking);

        world.clock.set(3_600);
        let rewards = world.service.open_chest(&diogenes, 0).await.unwrap();
        assert!((10..=59).contains(&rewards.scrolls));
        assert!((1..=5).contains(&rewards.books));
        assert!(rewards.cards.len() <= 1);

        let opened = world.progress(&diogenes).await;
        assert!(opened.chest_slots[0].is_none());
        assert_eq!(opened.balance(Currency::Scrolls), 100 + rewards.scrolls);
        assert_eq!(opened.balance(Currency::Books), 5 + rewards.books);
        for grant in &rewards.cards {
            assert_eq!(opened.card_count(&grant.card_id), grant.count);
        }
    }

    #[tokio::test]
    async fn test_second_unlock_is_refused_without_side_effects() {
        let world = World::new();
        let zeno = world.player("zeno").await;
        world.service.award_chest(&zeno, ChestType::Papiro).await.unwrap();
        world.service.award_chest(&zeno, ChestType::Lendario).await.unwrap();
        world.service.unlock_chest(&zeno, 0).await.unwrap();
        let before = world.progress(&zeno).await;

        let err = world.service.unlock_chest(&zeno, 1).await.unwrap_err();
        assert_eq!(err, ProgressError::AnotherChestUnlocking { index: 0 });
        assert_eq!(err.kind(), ErrorKind::Domain);
        assert_eq!(world.progress(&zeno).await, before);
    }

    #[tokio::test]
    async fn test_next_chest_unlocks_once_previous_is_ready() {
        let world = World::new();
        let zeno = world.player("zeno").await;
        world.service.award_chest(&zeno, ChestType::Papiro).await.unwrap();
        world.service.award_chest(&zeno, ChestType::Tomo).await.unwrap();
        world.service.unlock_chest(&zeno, 0).await.unwrap();

        world.clock.set(3_600);
        world.service.unlock_chest(&zeno, 1).await.unwrap();

        let progress = world.progress(&zeno).await;
        let statuses: Vec<_> = progress
            .chest_slots
            .iter()
            .flatten()
            .map(|c| c.status)
            .collect();
        assert_eq!(statuses, vec![ChestStatus::Ready, ChestStatus::Unlocking]);
        assert_eq!(
            progress.chest_slots[1].as_ref().and_then(|c| c.unlock_end_time),
            Some(3_600 + 10_800)
        );
    }

    #[tokio::test]
    async fn test_slots_fill_then_refuse() {
        let world = World::new();
        let epicurus = world.player("epicurus").await;
        for expected in 0..4 {
            let slot = world
                .service
                .award_chest(&epicurus, ChestType::Tomo)
                .await
                .unwrap();
            assert_eq!(slot, expected);
        }
        assert_eq!(
            world.service.award_chest(&epicurus, ChestType::Tomo).await,
            Err(ProgressError::NoFreeChestSlot)
        );
    }

    // =============================================================================
    // ECONOMY FLOWS
    // =============================================================================

    #[tokio::test]
    async fn test_donation_shortfall_mutates_neither_account() {
        let world = World::new();
        let sender = world.player("cicero").await;
        let receiver = world.player("atticus").await;
        world.set_balance(&sender, Currency::Books, 10).await;
        let sender_before = world.progress(&sender).await;
        let receiver_before = world.progress(&receiver).await;

        let err = world
            .service
            .donate(
                &sender,
                &receiver,
                DonationPayload::Currency {
                    currency: Currency::Books,
                    amount: 50,
                },
            )
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ProgressError::InsufficientFunds {
                currency: Currency::Books,
                required: 50,
                available: 10,
            }
        );
        assert_eq!(world.progress(&sender).await, sender_before);
        assert_eq!(world.progress(&receiver).await, receiver_before);
    }

    #[tokio::test]
    async fn test_purchase_shortfall_grants_nothing() {
        let world = World::new();
        let buyer = world.player("alcibiades").await;
        world.set_balance(&buyer, Currency::Books, 40).await;
        let before = world.progress(&buyer).await;

        let err = world
            .service
            .buy_item(&buyer, ItemKind::Philosopher, "socrates")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ProgressError::InsufficientFunds {
                currency: Currency::Books,
                required: 50,
                available: 40,
            }
        ));
        let after = world.progress(&buyer).await;
        assert_eq!(after, before);
        assert_eq!(after.card_count(&CardId::new("socrates").unwrap()), 0);
    }

    #[tokio::test]
    async fn test_purchase_then_gift_card() {
        let world = World::new();
        let buyer = world.player("crito").await;
        let friend = world.player("phaedo").await;
        world.set_balance(&buyer, Currency::Books, 60).await;

        world
            .service
            .buy_item(&buyer, ItemKind::Philosopher, "socrates")
            .await
            .unwrap();
        let socrates = CardId::new("socrates").unwrap();
        world
            .service
            .donate(
                &buyer,
                &friend,
                DonationPayload::Card {
                    card_id: socrates.clone(),
                },
            )
            .await
            .unwrap();

        let buyer_after = world.progress(&buyer).await;
        assert_eq!(buyer_after.balance(Currency::Books), 10);
        assert_eq!(buyer_after.card_count(&socrates), 0);
        assert_eq!(world.progress(&friend).await.card_count(&socrates), 1);
    }

    #[tokio::test]
    async fn test_trophies_unlock_wider_card_pool() {
        let world = World::new();
        let player = world.player("anaximander").await;
        let catalog = world.service.catalog().clone();
        let starting_pool = catalog.card_pool(0).len();

        let progress = world.service.add_trophies(&player, 2_500).await.unwrap();
        assert_eq!(progress.current_arena_id, 3);
        assert!(catalog.card_pool(progress.current_arena_id).len() > starting_pool);
    }
}
