//! Unit tests for payload types

use super::*;
use serde_json::json;

#[cfg(test)]
mod record_tests {
    use super::*;

    #[test]
    fn test_batting_record_accepts_numbers_strings_and_nulls() {
        let row = json!({
            "Name": "Matt Olson",
            "Team": "ATL",
            "IDfg": "14344",
            "AB": 616,
            "H": "172",
            "HR": 54,
            "AVG": "0.283",
            "SLG": ".604",
            "SB": null,
            "wRC+": 160,
            "K%": "22.9%"
        });

        let record: BattingRecord = serde_json::from_value(row).unwrap();

        assert_eq!(record.name(), "Matt Olson");
        assert_eq!(record.team(), "ATL");
        assert_eq!(record.player_id(), Some(14344));
        assert_eq!(record.line.at_bats, 616.0);
        assert_eq!(record.line.hits, 172.0);
        assert_eq!(record.line.avg, 0.283);
        assert_eq!(record.line.slg, 0.604);
        assert_eq!(record.line.stolen_bases, 0.0);
        assert_eq!(record.stat("wRC+"), Some(160.0));
        assert_eq!(record.stat("K%"), Some(22.9));
        assert_eq!(record.stat("WAR"), None);
    }

    #[test]
    fn test_unparseable_cells_default_to_zero() {
        let record: BattingRecord =
            serde_json::from_value(json!({"Name": "X", "AB": "n/a", "HR": true})).unwrap();
        assert_eq!(record.line.at_bats, 0.0);
        assert_eq!(record.line.home_runs, 0.0);
    }

    #[test]
    fn test_typed_columns_are_not_duplicated_in_extra() {
        let record: BattingRecord =
            serde_json::from_value(json!({"Team": "NYM", "HR": 20, "WAR": 3.1})).unwrap();
        assert!(!record.extra.contains_key("HR"));
        assert!(record.extra.contains_key("WAR"));
    }

    #[test]
    fn test_team_alias_and_label_fallback() {
        let record: PitchingRecord =
            serde_json::from_value(json!({"Tm": "Atlanta Braves", "ERA": "3.52"})).unwrap();
        assert_eq!(record.label(), "Atlanta Braves");
        assert_eq!(record.stat("ERA"), Some(3.52));
        assert!(record.has_stat("ERA"));
        assert!(!record.has_stat("SV"));
    }

    #[test]
    fn test_set_stat_updates_typed_or_extra_column() {
        let mut record = PitchingRecord::default();
        record.set_stat("SO", 200.0);
        record.set_stat("K/9", 10.5);

        assert_eq!(record.line.strikeouts, 200.0);
        assert_eq!(record.extra.get("K/9"), Some(&json!(10.5)));
        assert_eq!(record.stat("K/9"), Some(10.5));
    }

    #[test]
    fn test_numeric_stats_skip_text_columns() {
        let record: BattingRecord = serde_json::from_value(json!({
            "Name": "A",
            "HR": 3,
            "Bats": "R",
            "WAR": "1.5"
        }))
        .unwrap();
        let stats = record.numeric_stats();

        assert_eq!(stats.get("HR"), Some(&3.0));
        assert_eq!(stats.get("WAR"), Some(&1.5));
        assert!(!stats.contains_key("Bats"));
        assert!(!stats.contains_key("Name"));
    }

    #[test]
    fn test_serializes_with_backend_keys() {
        let record: BattingRecord =
            serde_json::from_value(json!({"Name": "A", "2B": 30, "WAR": 2})).unwrap();
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["Name"], "A");
        assert_eq!(value["2B"], 30.0);
        assert_eq!(value["WAR"], 2);
    }
}

#[cfg(test)]
mod envelope_tests {
    use super::*;

    #[test]
    fn test_wrapped_and_bare_payloads() {
        let wrapped: Envelope<Vec<u32>> =
            serde_json::from_value(json!({"success": true, "data": [1, 2]})).unwrap();
        assert_eq!(wrapped.into_data().unwrap(), vec![1, 2]);

        let bare: Envelope<Vec<u32>> = serde_json::from_value(json!([3])).unwrap();
        assert_eq!(bare.into_data().unwrap(), vec![3]);
    }

    #[test]
    fn test_unsuccessful_envelope_is_no_data() {
        let failed: Envelope<Vec<u32>> =
            serde_json::from_value(json!({"success": false, "data": []})).unwrap();
        assert!(matches!(failed.into_data(), Err(HanksTankError::NoData)));
    }
}

#[cfg(test)]
mod mlb_api_tests {
    use super::*;

    #[test]
    fn test_schedule_flattens_dates() {
        let schedule: ScheduleResponse = serde_json::from_value(json!({
            "dates": [
                {"games": [{
                    "gamePk": 745804,
                    "gameDate": "2024-07-04T17:05:00Z",
                    "status": {"statusCode": "I", "detailedState": "In Progress", "abstractGameState": "Live"},
                    "teams": {
                        "away": {"team": {"id": 144, "name": "Atlanta Braves"}, "score": 3,
                                 "leagueRecord": {"wins": 50, "losses": 36}},
                        "home": {"team": {"id": 121, "name": "New York Mets"}, "score": 1}
                    },
                    "venue": {"name": "Citi Field"}
                }]},
                {"games": [{"gamePk": 1, "status": {"statusCode": "F"}}]}
            ]
        }))
        .unwrap();

        let games = schedule.into_games();
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].game_pk, 745804);
        assert!(games[0].status.in_progress());
        assert_eq!(games[0].teams.away.team.name, "Atlanta Braves");
        assert_eq!(games[0].teams.away.score, Some(3));
        assert!(!games[1].status.in_progress());
    }

    #[test]
    fn test_live_feed_linescore_and_boxscore() {
        let feed: LiveFeed = serde_json::from_value(json!({
            "gamePk": 1,
            "gameData": {
                "teams": {
                    "away": {"name": "Atlanta Braves", "teamName": "Braves", "abbreviation": "ATL"},
                    "home": {"name": "New York Mets", "teamName": "Mets", "abbreviation": "NYM"}
                },
                "status": {"detailedState": "Final"},
                "venue": {"name": "Citi Field"},
                "datetime": {"dateTime": "2024-07-04T17:05:00Z"}
            },
            "liveData": {
                "linescore": {
                    "innings": [
                        {"num": 1, "away": {"runs": 2, "hits": 3, "errors": 0}, "home": {"runs": 0}},
                        {"num": 2, "away": {"runs": 0}}
                    ],
                    "teams": {"away": {"runs": 2, "hits": 3, "errors": 0}, "home": {"runs": 0, "hits": 1, "errors": 1}}
                },
                "boxscore": {"teams": {"away": {
                    "batters": [660670],
                    "pitchers": [],
                    "players": {"ID660670": {
                        "person": {"id": 660670, "fullName": "Ronald Acuna Jr."},
                        "position": {"abbreviation": "RF", "type": "Outfielder"},
                        "stats": {"batting": {"atBats": 4, "hits": 2}}
                    }}
                }}}
            }
        }))
        .unwrap();

        assert_eq!(feed.game_data.teams.away.team_name, "Braves");
        assert_eq!(feed.live_data.linescore.innings.len(), 2);
        assert!(feed.live_data.linescore.innings[1].home.is_none());
        assert_eq!(feed.live_data.linescore.teams.home.errors, 1);

        let away = &feed.live_data.boxscore.teams.away;
        let player = away.player(660670).unwrap();
        assert_eq!(player.person.full_name, "Ronald Acuna Jr.");
        assert_eq!(player.batting("hits"), 2.0);
        assert!(!player.is_pitcher());
        assert!(away.player(1).is_none());
    }

    #[test]
    fn test_transaction_optional_teams() {
        let tx: Transaction = serde_json::from_value(json!({
            "id": 1,
            "person": {"id": 5, "fullName": "Chris Sale"},
            "toTeam": {"id": 144, "name": "Atlanta Braves"},
            "date": "2024-01-02",
            "typeDesc": "Trade",
            "description": "Braves acquire LHP Chris Sale."
        }))
        .unwrap();

        assert!(tx.from_team.is_none());
        assert_eq!(tx.to_team.unwrap().name, "Atlanta Braves");
        assert_eq!(tx.type_desc, "Trade");
        assert!(tx.resolution.is_none());
    }

    #[test]
    fn test_article_published_timestamp() {
        let article: Article = serde_json::from_value(json!({
            "title": "T",
            "url": "https://example.com",
            "publishedAt": "2024-07-04T12:00:00Z",
            "source": {"name": "MLB.com"}
        }))
        .unwrap();
        assert!(article.published().is_some());

        let undated: Article = serde_json::from_value(json!({"title": "T", "publishedAt": null})).unwrap();
        assert!(undated.published().is_none());
    }

    #[test]
    fn test_available_stat_names_shapes() {
        assert_eq!(available_stat_names(&json!(["AVG", "OPS"])), vec!["AVG", "OPS"]);
        assert_eq!(
            available_stat_names(&json!({"success": true, "data": [{"key": "HR"}, {"name": "RBI"}]})),
            vec!["HR", "RBI"]
        );
        assert_eq!(available_stat_names(&json!({"ERA": {}, "WHIP": {}})), vec!["ERA", "WHIP"]);
        assert!(available_stat_names(&Value::Null).is_empty());
    }
}
