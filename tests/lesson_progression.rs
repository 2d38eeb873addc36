use cli_adventures::shell::{format_progress, Lesson, Session, ALL_COMPLETE};
mod common;
use common::run_all;

fn completes(session: &mut Session, line: &str, lesson: Lesson) {
    let response = session.process(line);
    let banner = format!("🎉 Challenge completed: {}\n", lesson.description());
    assert!(
        response.result.starts_with(&banner),
        "`{line}` should complete {:?}, got {:?}",
        lesson,
        response.result
    );
}

fn completes_nothing(session: &mut Session, line: &str) {
    let response = session.process(line);
    assert!(
        !response.result.contains("Challenge completed"),
        "`{line}` unexpectedly completed a lesson"
    );
}

#[test]
fn walkthrough_completes_every_lesson_in_order() {
    let mut session = Session::new();
    assert_eq!(session.snapshot().challenge, Lesson::Ls.description());
    assert_eq!(session.snapshot().challenge_hint, Lesson::Ls.hint());

    completes(&mut session, "ls", Lesson::Ls);
    completes(&mut session, "cd documents", Lesson::Cd);
    completes(&mut session, "cat secret.txt", Lesson::Cat);
    completes(&mut session, "pwd", Lesson::Pwd);
    completes(&mut session, "cd ..", Lesson::CdParent);
    completes(&mut session, "cat mission.txt", Lesson::MissionBrief);
    completes_nothing(&mut session, "cd projects");
    completes(&mut session, "cd hidden_vault", Lesson::FindTreasure);
    run_all(&mut session, &["cd ~", "cd downloads"]);
    completes(&mut session, "unzip archive.zip", Lesson::UnzipArchive);
    completes_nothing(&mut session, "cd archive");
    completes(&mut session, "mkdir relics", Lesson::CreateRelics);
    run_all(&mut session, &["cd ~", "cd projects", "cd hidden_vault"]);
    completes(&mut session, "mv treasure.json archive/relics", Lesson::MissionComplete);

    let done = session.snapshot();
    assert_eq!(done.challenge, ALL_COMPLETE);
    assert_eq!(done.challenge_hint, "");
    assert_eq!(session.lessons().completed_ids().len(), Lesson::ALL.len());
    assert!(format_progress(session.lessons()).starts_with("Lessons 10/10"));
    completes_nothing(&mut session, "ls");
}

#[test]
fn a_second_ls_completes_nothing() {
    let mut session = Session::new();
    completes(&mut session, "ls", Lesson::Ls);
    completes_nothing(&mut session, "ls");
    assert_eq!(session.lessons().completed_ids(), vec!["ls"]);
}

#[test]
fn only_the_earliest_pending_lesson_is_checked() {
    let mut session = Session::new();
    completes_nothing(&mut session, "cat mission.txt");
    completes_nothing(&mut session, "pwd");
    assert_eq!(session.lessons().current(), Some(Lesson::Ls));
}

#[test]
fn unreached_goals_never_count() {
    let mut session = Session::new();
    completes(&mut session, "ls", Lesson::Ls);
    completes_nothing(&mut session, "cd attic");
    completes_nothing(&mut session, "cd hidden_vault");
    completes(&mut session, "cd projects", Lesson::Cd);
    completes_nothing(&mut session, "cat nothing.txt");
    completes(&mut session, "cat README.md", Lesson::Cat);
}

#[test]
fn clear_never_grades_lessons() {
    let mut session = Session::new();
    completes_nothing(&mut session, "clear");
    assert_eq!(session.lessons().current(), Some(Lesson::Ls));
}

#[test]
fn finishing_the_mission_early_completes_the_last_lesson_when_reached() {
    let mut session = Session::new();
    run_all(
        &mut session,
        &[
            "cd downloads",
            "unzip archive.zip",
            "cd archive",
            "mkdir relics",
            "cd ~",
            "cd projects",
            "cd hidden_vault",
            "mv treasure.json archive/relics",
        ],
    );
    assert!(session.mission_complete());
    assert_eq!(session.lessons().current(), Some(Lesson::Ls));
    completes(&mut session, "ls", Lesson::Ls);
}

#[test]
fn work_done_ahead_of_its_lesson_still_counts() {
    let mut session = Session::new();
    run_all(
        &mut session,
        &[
            "ls",
            "cd documents",
            "cat secret.txt",
            "pwd",
            "cd ..",
            "cat mission.txt",
            "cd downloads",
            "unzip archive.zip",
            "cd archive",
            "mkdir relics",
            "cd ~",
            "cd projects",
        ],
    );
    assert_eq!(session.lessons().current(), Some(Lesson::FindTreasure));
    completes(&mut session, "cd hidden_vault", Lesson::FindTreasure);
    run_all(&mut session, &["cd ~", "cd downloads"]);
    completes(&mut session, "unzip archive.zip", Lesson::UnzipArchive);
    completes_nothing(&mut session, "cd archive");

    let response = session.process("mkdir relics");
    assert!(response
        .result
        .starts_with(&format!("🎉 Challenge completed: {}\n", Lesson::CreateRelics.description())));
    assert!(response.result.contains("Directory 'relics' already exists."));

    run_all(&mut session, &["cd ~", "cd projects", "cd hidden_vault"]);
    completes(&mut session, "mv treasure.json archive/relics", Lesson::MissionComplete);
    assert!(session.lessons().all_complete());
    assert_eq!(session.snapshot().challenge, ALL_COMPLETE);
}

#[test]
fn relics_made_outside_the_archive_do_not_count() {
    let mut session = Session::new();
    run_all(
        &mut session,
        &[
            "ls",
            "cd documents",
            "cat secret.txt",
            "pwd",
            "cd ..",
            "cat mission.txt",
            "cd projects",
            "cd hidden_vault",
            "cd ~",
            "cd downloads",
            "unzip archive.zip",
        ],
    );
    assert_eq!(session.lessons().current(), Some(Lesson::CreateRelics));
    completes_nothing(&mut session, "mkdir relics");
    assert_eq!(session.lessons().current(), Some(Lesson::CreateRelics));
}
