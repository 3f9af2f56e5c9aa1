//! Small interactive walk-through of the lock facade.
//!
//! Not the stress harness the design assumes exists elsewhere (a
//! random-workload driver with a fragmentation meter) — just enough to
//! watch the free list grow, split, and coalesce while inspecting the
//! program break with an external tool (`pmap`, `htop`, `gdb`) between
//! steps.

use std::io::Read;

use tsmalloc::LOCK;

fn block_until_enter_pressed() {
  println!("\n>>> Press ENTER to continue...");
  let _ = std::io::stdin().bytes().next();
}

fn print_state(label: &str) {
  println!(
    "[{}] segment_size = {} bytes, free_space_size = {} bytes",
    label,
    LOCK.segment_size(),
    LOCK.free_space_size(),
  );
}

fn main() {
  print_state("start");
  block_until_enter_pressed();

  println!("\n[1] malloc(100)");
  let a = LOCK.malloc(100);
  unsafe { (a as *mut u64).write(0xDEADBEEF) };
  print_state("after malloc(100)");
  block_until_enter_pressed();

  println!("\n[2] malloc(50)");
  let b = LOCK.malloc(50);
  print_state("after malloc(50)");
  block_until_enter_pressed();

  println!("\n[3] free(a)");
  LOCK.free(a);
  print_state("after free(a)");
  block_until_enter_pressed();

  println!("\n[4] malloc(40) — should split a's old block and reuse its address");
  let c = LOCK.malloc(40);
  println!("    c == a? {}", c == a);
  print_state("after malloc(40)");
  block_until_enter_pressed();

  println!("\n[5] free(b); free(c) — adjacent frees should coalesce");
  LOCK.free(b);
  LOCK.free(c);
  print_state("after coalescing frees");

  println!("\n[6] End of demo. The break never shrinks; the OS reclaims everything on exit.");
}
