use chrono::{DateTime, TimeZone, Utc};

use crate::server::model::auth::{Caller, Role};

fn admin() -> Caller {
    Caller::new("admin", Some(Role::Admin))
}

fn authority() -> Caller {
    Caller::new("officer", Some(Role::Authority))
}

fn citizen() -> Caller {
    Caller::new("u1", Some(Role::Citizen))
}

/// 2024-01-16 02:00 UTC, when the scheduled job covering 2024-01-15 runs
fn job_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 16, 2, 0, 0).unwrap()
}

mod get_dashboard_analytics {
    use chrono::{Duration, Utc};
    use civicwatch_test_utils::prelude::*;

    use super::*;
    use crate::{
        model::analytics::DashboardRequest,
        server::{
            error::{auth::AuthError, request::RequestError, Error},
            service::analytics::AnalyticsService,
        },
    };

    fn request(city: Option<&str>, time_range: Option<&str>) -> DashboardRequest {
        DashboardRequest {
            city: city.map(str::to_string),
            time_range: time_range.map(str::to_string),
        }
    }

    /// Tests the Springfield month summary: 10 issues, 4 resolved after 1 to 4 hours.
    ///
    /// Expected: resolvedIssues 4, averageResolutionTime 2, resolutionRate 40
    #[tokio::test]
    async fn summarizes_springfield_month() -> Result<(), TestError> {
        let now = Utc::now();
        let created = now.naive_utc() - Duration::days(3);
        let mut builder = TestBuilder::new().with_civic_tables();
        for hours in 1..=4 {
            builder = builder.with_issue(entity::issue::Model {
                feedback_rating: Some(4),
                ..factory::resolved_issue("u1", created, hours)
            });
        }
        for _ in 0..6 {
            builder = builder.with_issue(factory::issue("u2"));
        }
        builder = builder
            .with_issue(entity::issue::Model {
                created_at: now.naive_utc() - Duration::days(45),
                ..factory::issue("u2")
            })
            .with_user(entity::civic_user::Model {
                last_active_at: Some(now.naive_utc() - Duration::days(1)),
                ..factory::user("u1")
            })
            .with_user(entity::civic_user::Model {
                last_active_at: Some(now.naive_utc() - Duration::days(90)),
                ..factory::user("u2")
            })
            .with_user(entity::civic_user::Model {
                is_active: false,
                ..factory::user("u3")
            });
        let test = builder.build().await?;

        let service = AnalyticsService::new(&test.db);
        let result = service
            .get_dashboard_analytics(&authority(), request(Some(TEST_CITY), Some("month")), now)
            .await;

        let dashboard = result.unwrap();
        assert_eq!(dashboard.summary.total_issues, 10);
        assert_eq!(dashboard.summary.resolved_issues, 4);
        assert_eq!(dashboard.summary.pending_issues, 6);
        assert_eq!(dashboard.summary.average_resolution_time, 2);
        assert_eq!(dashboard.summary.resolution_rate, 40.0);
        assert_eq!(dashboard.summary.total_users, 2);
        assert_eq!(dashboard.summary.active_users, 1);
        assert_eq!(dashboard.summary.average_rating, 4.0);
        assert_eq!(dashboard.breakdowns.category.values().sum::<u64>(), 10);
        assert_eq!(dashboard.breakdowns.priority.values().sum::<u64>(), 10);

        Ok(())
    }

    /// Tests that a week window leaves out issues older than seven days.
    ///
    /// Expected: only the recent issue is counted
    #[tokio::test]
    async fn week_window_excludes_older_issues() -> Result<(), TestError> {
        let now = Utc::now();
        let test = TestBuilder::new()
            .with_civic_tables()
            .with_issue(factory::issue("u1"))
            .with_issue(entity::issue::Model {
                created_at: now.naive_utc() - Duration::days(10),
                ..factory::issue("u1")
            })
            .build()
            .await?;

        let service = AnalyticsService::new(&test.db);
        let dashboard = service
            .get_dashboard_analytics(&admin(), request(Some(TEST_CITY), Some("week")), now)
            .await
            .unwrap();

        assert_eq!(dashboard.summary.total_issues, 1);
        assert_eq!(dashboard.summary.resolution_rate, 0.0);
        assert_eq!(dashboard.summary.average_resolution_time, 0);

        Ok(())
    }

    /// Expected: Err(AuthError::PermissionDenied) for a citizen
    #[tokio::test]
    async fn denies_citizen() -> Result<(), TestError> {
        let test = TestBuilder::new().with_civic_tables().build().await?;

        let service = AnalyticsService::new(&test.db);
        let result = service
            .get_dashboard_analytics(&citizen(), request(Some(TEST_CITY), None), Utc::now())
            .await;

        assert!(matches!(
            result,
            Err(Error::AuthError(AuthError::PermissionDenied(_)))
        ));

        Ok(())
    }

    /// Expected: Err(RequestError::InvalidArgument) without a city
    #[tokio::test]
    async fn requires_city() -> Result<(), TestError> {
        let test = TestBuilder::new().with_civic_tables().build().await?;

        let service = AnalyticsService::new(&test.db);
        let result = service
            .get_dashboard_analytics(&admin(), request(None, None), Utc::now())
            .await;

        assert!(matches!(
            result,
            Err(Error::RequestError(RequestError::InvalidArgument(_)))
        ));

        Ok(())
    }
}

mod get_performance_metrics {
    use chrono::{Duration, Utc};
    use civicwatch_test_utils::prelude::*;

    use super::*;
    use crate::{
        model::analytics::PerformanceRequest,
        server::{
            error::{auth::AuthError, Error},
            model::issue::UNASSIGNED_DEPARTMENT,
            service::analytics::AnalyticsService,
        },
    };

    async fn seeded() -> Result<TestContext, TestError> {
        let created = Utc::now().naive_utc() - Duration::days(100);
        TestBuilder::new()
            .with_civic_tables()
            .with_issue(entity::issue::Model {
                assigned_department: Some("roads".to_string()),
                ..factory::resolved_issue("u1", created, 10)
            })
            .with_issue(entity::issue::Model {
                assigned_department: Some("water".to_string()),
                ..factory::issue("u1")
            })
            .with_issue(factory::issue("u1"))
            .build()
            .await
    }

    /// Tests grouping of all-time city issues by department.
    ///
    /// Expected: roads, water and unassigned buckets summing to the city total
    #[tokio::test]
    async fn groups_by_department() -> Result<(), TestError> {
        let test = seeded().await?;

        let service = AnalyticsService::new(&test.db);
        let result = service
            .get_performance_metrics(
                &admin(),
                PerformanceRequest {
                    city: Some(TEST_CITY.to_string()),
                    department_id: None,
                },
                Utc::now(),
            )
            .await;

        let metrics = result.unwrap();
        assert_eq!(metrics.city, TEST_CITY);
        assert_eq!(metrics.department_metrics.len(), 3);
        assert_eq!(metrics.department_metrics["roads"].resolved_issues, 1);
        assert_eq!(metrics.department_metrics["roads"].average_resolution_time, 10);
        assert_eq!(metrics.department_metrics[UNASSIGNED_DEPARTMENT].total_issues, 1);

        Ok(())
    }

    /// Expected: only the requested department is reported
    #[tokio::test]
    async fn filters_single_department() -> Result<(), TestError> {
        let test = seeded().await?;

        let service = AnalyticsService::new(&test.db);
        let metrics = service
            .get_performance_metrics(
                &admin(),
                PerformanceRequest {
                    city: Some(TEST_CITY.to_string()),
                    department_id: Some("water".to_string()),
                },
                Utc::now(),
            )
            .await
            .unwrap();

        let departments: Vec<_> = metrics.department_metrics.keys().cloned().collect();
        assert_eq!(departments, vec!["water".to_string()]);

        Ok(())
    }

    /// Expected: Err(AuthError::PermissionDenied) for an authority
    #[tokio::test]
    async fn denies_authority() -> Result<(), TestError> {
        let test = seeded().await?;

        let service = AnalyticsService::new(&test.db);
        let result = service
            .get_performance_metrics(
                &authority(),
                PerformanceRequest {
                    city: Some(TEST_CITY.to_string()),
                    department_id: None,
                },
                Utc::now(),
            )
            .await;

        assert!(matches!(
            result,
            Err(Error::AuthError(AuthError::PermissionDenied(_)))
        ));

        Ok(())
    }
}

mod generate_daily_analytics {
    use chrono::NaiveDate;
    use civicwatch_test_utils::prelude::*;
    use sea_orm::EntityTrait;
    use serde_json::json;

    use super::*;
    use crate::server::service::analytics::AnalyticsService;

    /// Tests snapshots for every active city over the previous UTC day.
    ///
    /// Expected: one snapshot per active city, counting only issues created on 2024-01-15
    #[tokio::test]
    async fn snapshots_previous_day_per_city() -> Result<(), TestError> {
        let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let at = |h: u32| day.and_hms_opt(h, 0, 0).unwrap();
        let test = TestBuilder::new()
            .with_civic_tables()
            .with_user(factory::user("a"))
            .with_user(entity::civic_user::Model {
                city: Some("Shelbyville".to_string()),
                ..factory::user("b")
            })
            .with_user(entity::civic_user::Model {
                city: Some("Ogdenville".to_string()),
                is_active: false,
                ..factory::user("c")
            })
            .with_issue(entity::issue::Model {
                priority: "emergency".to_string(),
                ..factory::resolved_issue("a", at(8), 2)
            })
            .with_issue(entity::issue::Model {
                created_at: at(23),
                ..factory::issue("a")
            })
            .with_issue(entity::issue::Model {
                created_at: at(0) - chrono::Duration::seconds(1),
                ..factory::issue("a")
            })
            .build()
            .await?;

        let service = AnalyticsService::new(&test.db);
        let result = service.generate_daily_analytics(job_time()).await;

        assert_eq!(result.unwrap(), 2);
        let springfield = entity::prelude::DailyAnalytics::find_by_id("Springfield_2024-01-15".to_string())
            .one(&test.db)
            .await?
            .unwrap();
        assert_eq!(springfield.total_issues, 2);
        assert_eq!(springfield.resolved_issues, 1);
        assert_eq!(springfield.emergency_issues, 1);
        assert_eq!(springfield.priority_breakdown, json!({ "emergency": 1, "medium": 1 }));
        assert_eq!(springfield.date, at(0));
        let shelbyville = entity::prelude::DailyAnalytics::find_by_id("Shelbyville_2024-01-15".to_string())
            .one(&test.db)
            .await?
            .unwrap();
        assert_eq!(shelbyville.total_issues, 0);

        Ok(())
    }

    /// Tests that rerunning the job for the same day overwrites rather than duplicates.
    ///
    /// Expected: still one snapshot per city after two runs
    #[tokio::test]
    async fn rerun_is_idempotent() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_civic_tables()
            .with_user(factory::user("a"))
            .build()
            .await?;

        let service = AnalyticsService::new(&test.db);
        service.generate_daily_analytics(job_time()).await.unwrap();
        service.generate_daily_analytics(job_time()).await.unwrap();

        let rows = entity::prelude::DailyAnalytics::find().all(&test.db).await?;
        assert_eq!(rows.len(), 1);

        Ok(())
    }
}

mod export_analytics_data {
    use chrono::NaiveDate;
    use civicwatch_test_utils::prelude::*;

    use super::*;
    use crate::{
        model::analytics::{ExportData, ExportFormat, ExportRequest},
        server::{
            data::daily_analytics::DailyAnalyticsRepository,
            error::{auth::AuthError, request::RequestError, Error},
            service::analytics::AnalyticsService,
        },
    };

    async fn seeded() -> Result<TestContext, TestError> {
        let test = TestBuilder::new().with_civic_tables().build().await?;
        let repo = DailyAnalyticsRepository::new(&test.db);
        for d in [12, 10, 11, 20] {
            let day = NaiveDate::from_ymd_opt(2024, 1, d)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap();
            repo.upsert(factory::daily_analytics(TEST_CITY, day)).await?;
        }
        Ok(test)
    }

    fn request(format: Option<&str>) -> ExportRequest {
        ExportRequest {
            city: Some(TEST_CITY.to_string()),
            start_date: Some("2024-01-10".to_string()),
            end_date: Some("2024-01-12T00:00:00Z".to_string()),
            format: format.map(str::to_string),
        }
    }

    /// Expected: JSON records in date order, bounds inclusive
    #[tokio::test]
    async fn exports_json_in_date_order() -> Result<(), TestError> {
        let test = seeded().await?;

        let service = AnalyticsService::new(&test.db);
        let result = service.export_analytics_data(&admin(), request(None)).await;

        let export = result.unwrap();
        assert_eq!(export.format, ExportFormat::Json);
        let ExportData::Json(records) = export.data else {
            panic!("expected JSON records");
        };
        let dates: Vec<_> = records.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-10", "2024-01-11", "2024-01-12"]);

        Ok(())
    }

    /// Tests CSV output shape: header plus one line per snapshot, breakdowns dropped.
    ///
    /// Expected: 4 lines of 7 fields each
    #[tokio::test]
    async fn exports_csv() -> Result<(), TestError> {
        let test = seeded().await?;

        let service = AnalyticsService::new(&test.db);
        let export = service
            .export_analytics_data(&admin(), request(Some("csv")))
            .await
            .unwrap();

        let ExportData::Csv(csv) = export.data else {
            panic!("expected CSV text");
        };
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "id,city,date,totalIssues,resolvedIssues,emergencyIssues,generatedAt"
        );
        assert!(lines[1].starts_with("\"Springfield_2024-01-10\",\"Springfield\",\"2024-01-10\",3,1,0,"));
        assert!(lines.iter().all(|line| line.split(',').count() == 7));

        Ok(())
    }

    /// Expected: empty CSV text when no snapshot is in range
    #[tokio::test]
    async fn exports_empty_csv_for_empty_range() -> Result<(), TestError> {
        let test = seeded().await?;

        let service = AnalyticsService::new(&test.db);
        let export = service
            .export_analytics_data(
                &admin(),
                ExportRequest {
                    start_date: Some("2023-01-01".to_string()),
                    end_date: Some("2023-01-31".to_string()),
                    ..request(Some("csv"))
                },
            )
            .await
            .unwrap();

        assert!(matches!(export.data, ExportData::Csv(ref csv) if csv.is_empty()));

        Ok(())
    }

    /// Expected: Err(RequestError::InvalidArgument) for an unparseable date
    #[tokio::test]
    async fn rejects_malformed_date() -> Result<(), TestError> {
        let test = seeded().await?;

        let service = AnalyticsService::new(&test.db);
        let result = service
            .export_analytics_data(
                &admin(),
                ExportRequest {
                    start_date: Some("last tuesday".to_string()),
                    ..request(None)
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(Error::RequestError(RequestError::InvalidArgument(_)))
        ));

        Ok(())
    }

    /// Expected: Err(RequestError::InvalidArgument) when a required field is missing
    #[tokio::test]
    async fn requires_dates() -> Result<(), TestError> {
        let test = seeded().await?;

        let service = AnalyticsService::new(&test.db);
        let result = service
            .export_analytics_data(
                &admin(),
                ExportRequest {
                    end_date: None,
                    ..request(None)
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(Error::RequestError(RequestError::InvalidArgument(_)))
        ));

        Ok(())
    }

    /// Expected: Err(AuthError::PermissionDenied) for an authority
    #[tokio::test]
    async fn denies_authority() -> Result<(), TestError> {
        let test = seeded().await?;

        let service = AnalyticsService::new(&test.db);
        let result = service.export_analytics_data(&authority(), request(None)).await;

        assert!(matches!(
            result,
            Err(Error::AuthError(AuthError::PermissionDenied(_)))
        ));

        Ok(())
    }
}
