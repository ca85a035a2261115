use std::{sync::Arc, time::Duration};

use schoolrun_dashboard::{
    DashboardParams, DialogPhase, LiveTracker, SchoolData,
    dashboards::{
        admin::AdminDashboard, driver::DriverDashboard, parent::ParentDashboard,
        student::StudentDashboard,
    },
    records::{Announcement, Audience},
};
use schoolrun_routing::{RouteOptions, Router, RouterParams};

fn router() -> Arc<Router> {
    Arc::new(Router::new(RouterParams {
        seed: Some(17),
        ..RouterParams::default()
    }))
}

#[tokio::test(start_paused = true)]
async fn test_parent_follows_live_bus() {
    let data = SchoolData::mock().shared();
    let router = router();
    let params = DashboardParams {
        seed: Some(2),
        ..DashboardParams::default()
    };

    let driver = DriverDashboard::new(Arc::clone(&data), Arc::clone(&router), &params, "driver-2")
        .unwrap();
    let first_stop = driver.stops().unwrap()[0].place.clone();
    let origin = router.gazetteer().place(&first_stop).unwrap().point;

    let tracker = LiveTracker::start(origin, &params).unwrap();
    let mut positions = tracker.subscribe();
    positions.changed().await.unwrap();
    let position = *positions.borrow_and_update();

    let parent = ParentDashboard::new(Arc::clone(&data), Arc::clone(&router), "parent-2").unwrap();
    let eta = parent
        .eta("student-3", &position, &RouteOptions::default())
        .unwrap();

    // the bus is jittered around the child's own stop
    assert!(eta.distance.value() < 500.0);
    assert!(eta.text.ends_with(" m)"));

    tracker.stop();
}

#[tokio::test(start_paused = true)]
async fn test_announcement_reaches_students() {
    let data = SchoolData::mock().shared();
    let params = DashboardParams::default();
    let mut admin = AdminDashboard::new(Arc::clone(&data), &params);

    let dialog = admin.announcement_dialog();
    dialog.open();
    dialog
        .submit(Announcement::new(
            "Exam week",
            "Buses leave fifteen minutes later.",
            Audience::Students,
            jiff::civil::date(2025, 11, 3),
        ))
        .unwrap();

    tokio::time::sleep(Duration::from_millis(1600)).await;
    assert_eq!(admin.announcement_dialog().phase(), DialogPhase::Success);

    tokio::time::sleep(Duration::from_millis(2000)).await;
    assert_eq!(admin.announcement_dialog().phase(), DialogPhase::Closed);

    let student = StudentDashboard::new(Arc::clone(&data), router(), "student-4").unwrap();
    let overview = student.overview(&RouteOptions::default()).unwrap();
    assert!(
        overview
            .announcements
            .iter()
            .any(|announcement| announcement.title == "Exam week")
    );
}

#[test]
fn test_archived_bus_leaves_child_without_bus() {
    let data = SchoolData::mock().shared();
    let admin = AdminDashboard::new(Arc::clone(&data), &DashboardParams::default());
    admin.archive_bus("bus-1").unwrap();

    let parent = ParentDashboard::new(data, router(), "parent-1").unwrap();
    let children = parent.children().unwrap();

    assert!(children.iter().all(|child| child.bus.is_none()));
}
