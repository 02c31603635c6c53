use std::io::{self, Write};

use anyhow::Result;
use console::{style, StyledObject, Term};
use serde::Serialize;
use textwrap::wrap;

use crate::commands::goal::GoalDetail;
use crate::commands::init::InitResult;
use crate::commands::status::{Overview, StatusResult};
use crate::commands::DeleteResult;
use crate::models::{Goal, Habit, Task, MAX_PROGRESS};
use crate::progress::{is_overdue, today};

/// Trait for types that can render themselves as human-readable CLI output.
pub trait Render {
    fn render(&self, w: &mut dyn Write) -> Result<()>;
}

/// Print as JSON if `json` is true, otherwise call `human` with a writer.
fn json_or<T: Serialize + ?Sized>(
    value: &T,
    json: bool,
    human: impl FnOnce(&mut dyn Write) -> Result<()>,
) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, value)?;
        writeln!(stdout)?;
    } else {
        human(&mut stdout)?;
    }
    Ok(())
}

fn terminal_width() -> usize {
    let (_, cols) = Term::stdout().size();
    cols as usize
}

/// Write a labeled field, wrapping long or multiline values.
///
/// Short values print inline: `{prefix}{label}: {value}`
/// Long or multiline values wrap onto indented continuation lines:
/// ```text
/// {prefix}{label}:
/// {prefix}  {wrapped line 1}
/// {prefix}  {wrapped line 2}
/// ```
pub fn write_field(w: &mut dyn Write, prefix: &str, label: &str, value: &str) -> Result<()> {
    let width = terminal_width();
    let inline_prefix = format!("{prefix}{label}: ");
    let inline_len = inline_prefix.len() + value.len();

    if !value.contains('\n') && inline_len <= width {
        writeln!(w, "{inline_prefix}{value}")?;
    } else {
        writeln!(w, "{prefix}{label}:")?;
        let continuation = format!("{prefix}  ");
        let wrap_width = width.saturating_sub(continuation.len()).max(20);
        for paragraph in value.split('\n') {
            if paragraph.is_empty() {
                writeln!(w)?;
            } else {
                for line in wrap(paragraph, wrap_width) {
                    writeln!(w, "{continuation}{line}")?;
                }
            }
        }
    }
    Ok(())
}

const BAR_WIDTH: usize = 20;

/// `[##########----------]  50%`
pub fn progress_bar(progress: u8) -> String {
    let progress = progress.min(MAX_PROGRESS);
    let filled = usize::from(progress) * BAR_WIDTH / usize::from(MAX_PROGRESS);
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        progress
    )
}

fn styled_bar(progress: u8) -> StyledObject<String> {
    let bar = style(progress_bar(progress));
    if progress >= MAX_PROGRESS {
        bar.green()
    } else if progress >= 50 {
        bar.yellow()
    } else {
        bar.dim()
    }
}

impl Render for Goal {
    fn render(&self, w: &mut dyn Write) -> Result<()> {
        writeln!(
            w,
            "{} [{}] {}",
            style(&self.id).cyan().bold(),
            style(self.status.as_ref()).yellow(),
            self.title
        )?;
        if let Some(description) = &self.description {
            write_field(w, "  ", "Description", description)?;
        }
        match (self.start, self.end) {
            (Some(start), Some(end)) => writeln!(w, "  Dates: {start} to {end}")?,
            (Some(start), None) => writeln!(w, "  Starts: {start}")?,
            (None, Some(end)) => writeln!(w, "  Ends: {end}")?,
            (None, None) => {}
        }
        writeln!(w, "  Progress: {}", styled_bar(self.progress))?;
        Ok(())
    }
}

impl Render for Habit {
    fn render(&self, w: &mut dyn Write) -> Result<()> {
        writeln!(
            w,
            "{} [{}] {}",
            style(&self.id).cyan().bold(),
            style(self.status.as_ref()).yellow(),
            self.title
        )?;
        writeln!(w, "  Goal: {}", self.goal_id)?;
        if let Some(description) = &self.description {
            write_field(w, "  ", "Description", description)?;
        }
        writeln!(
            w,
            "  Period: {} of {} ({})",
            self.completed_in_period,
            self.target_per_period,
            self.frequency
        )?;
        writeln!(w, "  Progress: {}", styled_bar(self.progress))?;
        Ok(())
    }
}

impl Render for Task {
    fn render(&self, w: &mut dyn Write) -> Result<()> {
        writeln!(
            w,
            "{} [{}] {}",
            style(&self.id).cyan().bold(),
            style(self.status.as_ref()).yellow(),
            self.title
        )?;
        if let Some(goal_id) = &self.goal_id {
            writeln!(w, "  Goal: {goal_id}")?;
        }
        if let Some(habit_id) = &self.habit_id {
            writeln!(w, "  Habit: {habit_id}")?;
        }
        if let Some(description) = &self.description {
            write_field(w, "  ", "Description", description)?;
        }
        if let Some(priority) = self.priority {
            writeln!(w, "  Priority: {priority}")?;
        }
        if let Some(deadline) = self.deadline {
            if is_overdue(self, today()) {
                writeln!(
                    w,
                    "  Deadline: {} {}",
                    style(deadline).red(),
                    style("(overdue)").red().bold()
                )?;
            } else {
                writeln!(w, "  Deadline: {deadline}")?;
            }
        }
        match (self.spent_hours, self.estimated_hours) {
            (Some(spent), Some(estimate)) => writeln!(w, "  Hours: {spent} of {estimate}")?,
            (None, Some(estimate)) => writeln!(w, "  Estimate: {estimate}h")?,
            (Some(spent), None) => writeln!(w, "  Spent: {spent}h")?,
            (None, None) => {}
        }
        writeln!(w, "  Progress: {}", styled_bar(self.progress))?;
        Ok(())
    }
}

fn render_list<T: Render>(w: &mut dyn Write, items: &[T], empty: &str) -> Result<()> {
    if items.is_empty() {
        writeln!(w, "{empty}")?;
        return Ok(());
    }

    for item in items {
        item.render(w)?;
        writeln!(w)?;
    }
    Ok(())
}

// -- Init --

pub fn initialized(result: &InitResult, json: bool) -> Result<()> {
    json_or(result, json, |w| {
        writeln!(
            w,
            "{} {}",
            style("Initialized goalpost in").green(),
            style(result.dir.display()).cyan()
        )?;
        if result.goals > 0 {
            writeln!(
                w,
                "  Loaded {} goals, {} habits and {} tasks",
                result.goals, result.habits, result.tasks
            )?;
        }
        Ok(())
    })
}

// -- Goal outputs --

pub fn goal_saved(verb: &str, goal: &Goal, json: bool) -> Result<()> {
    json_or(goal, json, |w| {
        writeln!(
            w,
            "{} {}",
            style(format!("{verb} goal:")).green(),
            style(&goal.id).cyan().bold()
        )?;
        goal.render(w)
    })
}

pub fn goal_list(goals: &[Goal], json: bool) -> Result<()> {
    json_or(goals, json, |w| render_list(w, goals, "No goals found."))
}

pub fn goal_detail(detail: &GoalDetail, json: bool) -> Result<()> {
    json_or(detail, json, |w| {
        detail.goal.render(w)?;

        writeln!(w)?;
        writeln!(w, "{}", style("Habits:").bold())?;
        if detail.habits.is_empty() {
            writeln!(w, "  {}", style("(none)").dim())?;
        }
        for habit in &detail.habits {
            writeln!(
                w,
                "  {} {} - {}",
                style(&habit.id).cyan(),
                progress_bar(habit.progress),
                habit.title
            )?;
        }

        writeln!(w)?;
        writeln!(w, "{}", style("Tasks:").bold())?;
        if detail.tasks.is_empty() {
            writeln!(w, "  {}", style("(none)").dim())?;
        }
        let today = today();
        for task in &detail.tasks {
            let marker = if is_overdue(task, today) {
                style(" overdue").red().to_string()
            } else {
                String::new()
            };
            writeln!(
                w,
                "  {} {} [{}] - {}{}",
                style(&task.id).cyan(),
                progress_bar(task.progress),
                style(task.status.as_ref()).yellow(),
                task.title,
                marker
            )?;
        }
        Ok(())
    })
}

// -- Habit outputs --

pub fn habit_saved(verb: &str, habit: &Habit, json: bool) -> Result<()> {
    json_or(habit, json, |w| {
        writeln!(
            w,
            "{} {}",
            style(format!("{verb} habit:")).green(),
            style(&habit.id).cyan().bold()
        )?;
        habit.render(w)
    })
}

pub fn habit_list(habits: &[Habit], json: bool) -> Result<()> {
    json_or(habits, json, |w| render_list(w, habits, "No habits found."))
}

// -- Task outputs --

pub fn task_saved(verb: &str, task: &Task, json: bool) -> Result<()> {
    json_or(task, json, |w| {
        writeln!(
            w,
            "{} {}",
            style(format!("{verb} task:")).green(),
            style(&task.id).cyan().bold()
        )?;
        task.render(w)
    })
}

pub fn task_list(tasks: &[Task], json: bool) -> Result<()> {
    json_or(tasks, json, |w| render_list(w, tasks, "No tasks found."))
}

// -- Deletes --

pub fn deleted(kind: &str, result: &DeleteResult, json: bool) -> Result<()> {
    json_or(result, json, |w| {
        writeln!(
            w,
            "{} {} of {} {kind}(s).",
            style("Deleted").red(),
            style(result.deleted).bold(),
            result.requested
        )?;
        let skipped = result.requested - result.deleted;
        if skipped > 0 {
            writeln!(w, "  {} id(s) not found, skipped.", style(skipped).yellow())?;
        }
        Ok(())
    })
}

// -- Status outputs --

pub fn status(result: &StatusResult, json: bool) -> Result<()> {
    match result {
        StatusResult::Goal(detail) => goal_detail(detail, json),
        StatusResult::Overview(overview) => status_overview(overview, json),
    }
}

fn status_overview(overview: &Overview, json: bool) -> Result<()> {
    json_or(overview, json, |w| {
        if overview.goals.is_empty() {
            writeln!(w, "No goals found.")?;
        } else {
            writeln!(w, "{}\n", style("All Goals:").bold())?;
        }

        for summary in &overview.goals {
            let goal = &summary.goal;
            writeln!(
                w,
                "{} [{}] {}",
                style(&goal.id).cyan().bold(),
                style(goal.status.as_ref()).yellow(),
                goal.title
            )?;
            writeln!(w, "  {}", styled_bar(goal.progress))?;
            writeln!(
                w,
                "  Habits: {}  Tasks: {} total, {} done, {} overdue",
                summary.habit_count, summary.task_count, summary.tasks_done, summary.tasks_overdue
            )?;
            writeln!(w)?;
        }

        if overview.unassigned_tasks > 0 {
            writeln!(w, "Tasks without a goal: {}", overview.unassigned_tasks)?;
        }
        if overview.overdue_tasks > 0 {
            writeln!(
                w,
                "{} {}",
                style("Overdue tasks:").red(),
                style(overview.overdue_tasks).red().bold()
            )?;
        }
        Ok(())
    })
}
