//! Per-platform capability tables.
//!
//! Every platform difference the bridge knows about lives here: which native
//! entry points exist, which fields the platform refuses to update, which
//! fields a new record must carry, and how recurring instances are addressed.

use calbridge_core::Platform;
use calbridge_protocol::NativeMethod;

/// Static description of one platform's native calendar module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformProfile {
    pub platform: Platform,
    /// Entry points the native module exposes.
    pub methods: &'static [NativeMethod],
    /// Calendar fields the platform will not update.
    pub calendar_read_only: &'static [&'static str],
    /// Event fields the platform will not update.
    pub event_read_only: &'static [&'static str],
    /// Reminder fields the platform will not update.
    pub reminder_read_only: &'static [&'static str],
    /// Event fields required on creation, checked in order.
    pub event_create_required: &'static [&'static str],
    /// Attendee fields required on creation, checked in order.
    pub attendee_create_required: &'static [&'static str],
    /// Whether recurring instances are addressed by their start date.
    pub honors_instance_start_date: bool,
    /// Whether colors cross the bridge as signed 32-bit integers.
    pub signed_colors: bool,
}

use NativeMethod::*;

const IOS_METHODS: &[NativeMethod] = &[
    GetCalendars,
    SaveCalendar,
    DeleteCalendar,
    GetDefaultCalendar,
    GetEvents,
    GetEventById,
    SaveEvent,
    DeleteEvent,
    GetAttendeesForEvent,
    GetReminders,
    GetReminderById,
    SaveReminder,
    DeleteReminder,
    GetSources,
    GetSourceById,
    GetCalendarPermissions,
    RequestCalendarPermissions,
    GetRemindersPermissions,
    RequestRemindersPermissions,
];

const ANDROID_METHODS: &[NativeMethod] = &[
    GetCalendars,
    SaveCalendar,
    DeleteCalendar,
    GetEvents,
    GetEventById,
    SaveEvent,
    DeleteEvent,
    GetAttendeesForEvent,
    SaveAttendeeForEvent,
    DeleteAttendee,
    OpenEventInCalendar,
    GetCalendarPermissions,
    RequestCalendarPermissions,
];

const ATTENDEE_REQUIRED: &[&str] = &["email", "role", "type", "status"];
const REMINDER_READ_ONLY: &[&str] = &["creationDate", "lastModifiedDate"];

static IOS: PlatformProfile = PlatformProfile {
    platform: Platform::Ios,
    methods: IOS_METHODS,
    calendar_read_only: &[
        "source",
        "type",
        "entityType",
        "allowsModifications",
        "allowedAvailabilities",
    ],
    event_read_only: &[
        "creationDate",
        "lastModifiedDate",
        "originalStartDate",
        "isDetached",
        "status",
        "organizer",
    ],
    reminder_read_only: REMINDER_READ_ONLY,
    event_create_required: &[],
    attendee_create_required: ATTENDEE_REQUIRED,
    honors_instance_start_date: true,
    signed_colors: false,
};

static ANDROID: PlatformProfile = PlatformProfile {
    platform: Platform::Android,
    methods: ANDROID_METHODS,
    calendar_read_only: &[
        "source",
        "color",
        "allowsModifications",
        "allowedAvailabilities",
        "isPrimary",
        "ownerAccount",
        "timeZone",
        "allowedReminders",
        "allowedAttendeeTypes",
        "accessLevel",
    ],
    event_read_only: &[],
    reminder_read_only: REMINDER_READ_ONLY,
    event_create_required: &["startDate", "endDate"],
    attendee_create_required: ATTENDEE_REQUIRED,
    honors_instance_start_date: false,
    signed_colors: true,
};

static WEB: PlatformProfile = PlatformProfile {
    platform: Platform::Web,
    methods: &[],
    calendar_read_only: &[],
    event_read_only: &[],
    reminder_read_only: &[],
    event_create_required: &[],
    attendee_create_required: ATTENDEE_REQUIRED,
    honors_instance_start_date: false,
    signed_colors: false,
};

impl PlatformProfile {
    /// Returns the profile for `platform`.
    pub fn for_platform(platform: Platform) -> &'static PlatformProfile {
        match platform {
            Platform::Ios => &IOS,
            Platform::Android => &ANDROID,
            Platform::Web => &WEB,
        }
    }

    pub fn ios() -> &'static PlatformProfile {
        &IOS
    }

    pub fn android() -> &'static PlatformProfile {
        &ANDROID
    }

    pub fn web() -> &'static PlatformProfile {
        &WEB
    }

    /// Returns true if the platform's native module has `method`.
    pub fn exposes(&self, method: NativeMethod) -> bool {
        self.methods.contains(&method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHARED_METHODS: [NativeMethod; 10] = [
        GetCalendars,
        SaveCalendar,
        DeleteCalendar,
        GetEvents,
        GetEventById,
        SaveEvent,
        DeleteEvent,
        GetAttendeesForEvent,
        GetCalendarPermissions,
        RequestCalendarPermissions,
    ];

    #[test]
    fn shared_methods_exist_everywhere_native() {
        for method in SHARED_METHODS {
            assert!(PlatformProfile::ios().exposes(method), "{method}");
            assert!(PlatformProfile::android().exposes(method), "{method}");
        }
    }

    #[test]
    fn platform_only_methods() {
        let ios = PlatformProfile::ios();
        let android = PlatformProfile::android();

        for method in [GetDefaultCalendar, GetReminders, GetSources, RequestRemindersPermissions] {
            assert!(ios.exposes(method));
            assert!(!android.exposes(method));
        }
        for method in [SaveAttendeeForEvent, DeleteAttendee, OpenEventInCalendar] {
            assert!(android.exposes(method));
            assert!(!ios.exposes(method));
        }
    }

    #[test]
    fn every_method_belongs_to_some_platform() {
        for method in NativeMethod::ALL {
            assert!(
                PlatformProfile::ios().exposes(*method)
                    || PlatformProfile::android().exposes(*method),
                "{method} is orphaned"
            );
        }
    }

    #[test]
    fn web_exposes_nothing() {
        assert!(PlatformProfile::web().methods.is_empty());
        assert_eq!(PlatformProfile::for_platform(Platform::Web).platform, Platform::Web);
    }

    #[test]
    fn read_only_tables_differ_per_platform() {
        assert!(PlatformProfile::android().calendar_read_only.contains(&"color"));
        assert!(!PlatformProfile::ios().calendar_read_only.contains(&"color"));
        assert!(PlatformProfile::android().event_read_only.is_empty());
        assert_eq!(
            PlatformProfile::ios().reminder_read_only,
            PlatformProfile::android().reminder_read_only
        );
    }
}
