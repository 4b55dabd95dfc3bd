#[cfg(test)]
mod tests {
    use cafe_engine::accrual::AccrualSession;
    use cafe_engine::swap;
    use cafe_engine::*;

    const HALF_HOUR: u64 = MS_PER_HOUR / 2;

    fn seated(config: CafeConfig) -> Cafe {
        let mut cafe = Cafe::new(config).expect("test: valid config");
        assert!(cafe.toggle_wallet());
        cafe
    }

    // ========== Brew Accrual ==========

    #[test]
    fn test_half_hour_brew_then_collect() {
        let mut session = AccrualSession::new(24.0);
        session.start(Timestamp(0)).unwrap();
        assert_eq!(session.tick(Timestamp(1_800_000)), 12.0);
        assert_eq!(session.collect(Timestamp(1_800_000)), 12.0);
        assert_eq!(session.accumulated(), 0.0);
    }

    #[test]
    fn test_throttled_timer_does_not_change_reward() {
        // Same hour of brewing: steady 1.5s refreshes vs one late refresh.
        let mut steady = seated(CafeConfig::default());
        let mut throttled = seated(CafeConfig::default());
        steady.start_brew(Timestamp(0)).unwrap();
        throttled.start_brew(Timestamp(0)).unwrap();

        let mut t = 0;
        while t < MS_PER_HOUR {
            t = (t + 1_500).min(MS_PER_HOUR);
            steady.refresh(Timestamp(t));
        }
        throttled.refresh(Timestamp(MS_PER_HOUR - 7));

        let a = steady.collect_brew(Timestamp(MS_PER_HOUR)).unwrap();
        let b = throttled.collect_brew(Timestamp(MS_PER_HOUR)).unwrap();
        assert_eq!(a.amount, 24.0);
        assert_eq!(a.amount, b.amount);
    }

    #[test]
    fn test_no_double_collection() {
        let mut cafe = seated(CafeConfig::default());
        cafe.start_brew(Timestamp(0)).unwrap();
        assert_eq!(cafe.collect_brew(Timestamp(HALF_HOUR)).unwrap().amount, 12.0);
        assert_eq!(cafe.collect_brew(Timestamp(HALF_HOUR)), Err(CafeError::NothingToCollect));
        assert_eq!(cafe.balances().get(Currency::Beans), 12.0);
    }

    #[test]
    fn test_restart_resets_baseline_and_keeps_rate() {
        let mut cafe = seated(CafeConfig::default());
        cafe.start_brew(Timestamp(0)).unwrap();
        cafe.stop_brew(Timestamp(HALF_HOUR));
        cafe.start_brew(Timestamp(10 * MS_PER_HOUR)).unwrap();
        assert_eq!(cafe.brew().rate_per_hour(), 24.0);
        assert_eq!(cafe.refresh(Timestamp(10 * MS_PER_HOUR + HALF_HOUR)), 24.0);
    }

    // ========== Bar ==========

    #[test]
    fn test_swap_ten_lady_at_95() {
        let config = CafeConfig { initial_lady: 25.0, ..CafeConfig::default() };
        let mut cafe = seated(config);
        assert_eq!(swap::estimate(10.0, 95.0).unwrap(), 950.0);

        let transfer = cafe.buy_beans(10.0).unwrap();
        assert_eq!(transfer.credited, 950.0);
        assert_eq!(cafe.balances().get(Currency::Lady), 15.0);
        assert_eq!(cafe.balances().get(Currency::Beans), 950.0);
    }

    #[test]
    fn test_negative_swap_input_is_invalid() {
        assert_eq!(swap::estimate(-0.5, 95.0), Err(CafeError::InvalidAmount(-0.5)));
        let mut cafe = seated(CafeConfig::default());
        assert_eq!(cafe.buy_beans(-0.5), Err(CafeError::InvalidAmount(-0.5)));
        assert_eq!(cafe.balances().get(Currency::Lady), 2.5);
    }

    // ========== Quests ==========

    #[test]
    fn test_claim_before_start_credits_nothing() {
        let mut cafe = seated(CafeConfig::default());
        assert_eq!(cafe.claim_quest(2), Err(CafeError::QuestNotCompleted(2)));
        assert_eq!(cafe.balances().get(Currency::Beans), 0.0);
        assert!(cafe.drain_effects().is_empty());
    }

    #[test]
    fn test_claim_twice_credits_once() {
        let mut cafe = seated(CafeConfig::default());
        cafe.start_quest(2).unwrap();
        assert_eq!(cafe.claim_quest(2), Ok(10.0));
        assert!(matches!(cafe.claim_quest(2), Err(CafeError::AlreadyInState { .. })));
        assert_eq!(cafe.balances().get(Currency::Beans), 10.0);
        let confetti = cafe
            .drain_effects()
            .into_iter()
            .filter(|e| matches!(e, Effect::Confetti { quest_id: 2 }))
            .count();
        assert_eq!(confetti, 1);
    }

    // ========== Wallet ==========

    #[test]
    fn test_disconnect_is_display_only() {
        let mut cafe = seated(CafeConfig::default());
        cafe.buy_beans(1.0).unwrap();
        assert!(!cafe.toggle_wallet());

        let view = cafe.view();
        assert_eq!(view.lady_balance, "0.0");
        assert_eq!(view.beans_balance, "0.0");
        assert_eq!(cafe.balances().get(Currency::Lady), 1.5);

        cafe.toggle_wallet();
        let view = cafe.view();
        assert_eq!(view.lady_balance, "1.500");
        assert_eq!(view.beans_balance, "95.00");
    }

    // ========== Feed & Graph ==========

    #[test]
    fn test_app_feed_is_bounded_and_seeded() {
        let mut a = CafeApp::with_config(CafeConfig::default(), 42).unwrap();
        let mut b = CafeApp::with_config(CafeConfig::default(), 42).unwrap();
        for i in 0..60u64 {
            let ea = a.feed_mut().generate(Timestamp(i * 2_500)).clone();
            let eb = b.feed_mut().generate(Timestamp(i * 2_500)).clone();
            assert_eq!(ea, eb);
        }
        assert_eq!(a.feed().log().len(), 40);
        assert_eq!(a.feed().log().iter().next().map(|e| e.seq), Some(20));
        assert!(a.feed().log().iter().all(|e| !e.message.is_empty()));
    }

    #[test]
    fn test_app_graph_matches_config() {
        let config = CafeConfig { graph_nodes: 30, graph_extra_edges: 10, ..CafeConfig::default() };
        let mut app = CafeApp::with_config(config, 7).unwrap();
        assert_eq!(app.scene().graph().nodes.len(), 30);
        assert_eq!(app.scene().renderer().nodes.len(), 30);
        app.jitter();
        assert_eq!(app.scene().renderer().node_updates, 2);
    }
}
