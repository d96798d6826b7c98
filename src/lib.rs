// Crate entry point. Declares and exposes modules so the binary and the tests can reach them.
// No business logic here.

pub mod shared {
    pub mod core {
        pub mod errors;
        pub mod notifications;
        pub mod primitives;
    }
    pub mod infrastructure {
        pub mod event_store;
        pub mod intent_outbox;
        pub mod keyed_lock;
    }
}

pub mod modules {
    pub mod calendar {
        pub mod core {
            pub mod policy;
            pub mod unavailable_date;
        }
        pub mod use_cases {
            pub mod check_date {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod manage_unavailable_dates {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod unavailable_dates;
                pub mod unavailable_dates_in_memory;
            }
        }
    }

    pub mod slots {
        pub mod core {
            pub mod decide;
            pub mod events;
            pub mod evolve;
            pub mod slot_id;
            pub mod state;
        }
        pub mod use_cases {
            pub mod slot_ledger {
                pub mod handler;
            }
            pub mod available_slots {
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
        }
    }

    pub mod appointments {
        pub mod core {
            pub mod decide;
            pub mod estimates;
            pub mod events;
            pub mod evolve;
            pub mod state;
        }
        pub mod use_cases {
            pub mod book_appointment {
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod assign_employees {
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod cancel_appointment {
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod query_appointments {
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod record_task_progress {
                pub mod handler;
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod appointment_stream;
                pub mod assignment_tasks;
                pub mod catalog;
                pub mod catalog_in_memory;
                pub mod employee_directory;
                pub mod employee_directory_in_memory;
                pub mod projections;
                pub mod projections_in_memory;
            }
        }
    }

    pub mod tasks {
        pub mod core {
            pub mod decide;
            pub mod events;
            pub mod evolve;
            pub mod state;
            pub mod status;
        }
        pub mod use_cases {
            pub mod open_tasks {
                pub mod handler;
            }
            pub mod drive_task {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod appointment_progress;
                pub mod projections;
                pub mod projections_in_memory;
            }
        }
    }

    pub mod time_tracking {
        pub mod core {
            pub mod decide;
            pub mod events;
            pub mod evolve;
            pub mod state;
        }
        pub mod use_cases {
            pub mod track_time {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
        }
    }
}

pub mod shell;

#[cfg(test)]
pub mod tests {
    pub mod fixtures;

    pub mod e2e {
        pub mod booking_flow_tests;
        pub mod concurrency_tests;
        pub mod time_tracking_tests;
    }
}
