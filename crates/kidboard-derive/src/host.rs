use sysinfo::System;

/// Host load figures used by the health section.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HostStats {
    /// One-minute load average.
    pub load_one: f64,
    pub cpu_count: usize,
    pub total_memory: u64,
    pub used_memory: u64,
}

impl HostStats {
    pub fn probe() -> Self {
        let mut sys = System::new();
        sys.refresh_cpu();
        sys.refresh_memory();
        Self {
            load_one: System::load_average().one,
            cpu_count: sys.cpus().len(),
            total_memory: sys.total_memory(),
            used_memory: sys.used_memory(),
        }
    }

    /// One-minute load as a percentage of available cores.
    pub fn cpu_percent(&self) -> u32 {
        let cores = self.cpu_count.max(1) as f64;
        (self.load_one / cores * 100.0).round().max(0.0) as u32
    }

    pub fn memory_percent(&self) -> u32 {
        if self.total_memory == 0 {
            return 0;
        }
        (self.used_memory as f64 / self.total_memory as f64 * 100.0).round() as u32
    }
}
